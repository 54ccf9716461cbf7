use async_trait::async_trait;

use super::domain::{NewStudent, Student};
use super::query::ListFilter;

/// Result of a store operation that can fail for business reasons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOutcome {
    Success(Student),
    NotFound,
    Duplicate,
}

impl StoreOutcome {
    pub fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }

    pub fn into_student(self) -> Option<Student> {
        match self {
            Self::Success(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait abstraction for student record storage.
///
/// Inputs are already validated; implementations only enforce lookup and
/// the case-insensitive `(name, class)` uniqueness rule.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Vec<Student>;
    async fn get(&self, id: &str) -> StoreOutcome;
    async fn create(&self, input: NewStudent) -> StoreOutcome;
    async fn update(&self, id: &str, input: NewStudent) -> StoreOutcome;
    async fn delete(&self, id: &str) -> StoreOutcome;
    async fn count(&self) -> usize;
}
