use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

pub const NAME_MAX_CHARS: usize = 100;
pub const CLASS_MAX_CHARS: usize = 20;
pub const MARKS_MIN: i64 = 0;
pub const MARKS_MAX: i64 = 100;

/// A stored student record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class: String,
    pub marks: u8,
}

impl Student {
    /// Case-insensitive `(name, class)` match used for the uniqueness check.
    pub fn same_identity(&self, name: &str, class: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
            && self.class.to_lowercase() == class.to_lowercase()
    }
}

/// Create/update request body. Nothing is trusted until `validate` passes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    #[serde(alias = "student_class")]
    pub class: String,
    pub marks: i64,
}

/// Validated, trimmed field set ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub class: String,
    pub marks: u8,
}

impl NewStudent {
    pub fn into_student(self, id: String) -> Student {
        Student { id, name: self.name, class: self.class, marks: self.marks }
    }
}

impl StudentInput {
    pub fn validate(self) -> Result<NewStudent, ServiceError> {
        let name = trimmed_field("name", &self.name, NAME_MAX_CHARS)?;
        let class = trimmed_field("class", &self.class, CLASS_MAX_CHARS)?;
        let marks = check_marks("marks", self.marks)?;
        Ok(NewStudent { name, class, marks })
    }
}

fn trimmed_field(field: &str, raw: &str, max: usize) -> Result<String, ServiceError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(ServiceError::validation(format!("{field} cannot be empty or whitespace")));
    }
    if v.chars().count() > max {
        return Err(ServiceError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(v.to_string())
}

/// Range check shared by record marks and the listing bounds.
pub fn check_marks(field: &str, v: i64) -> Result<u8, ServiceError> {
    if !(MARKS_MIN..=MARKS_MAX).contains(&v) {
        return Err(ServiceError::validation(format!(
            "{field} must be between {MARKS_MIN} and {MARKS_MAX}"
        )));
    }
    Ok(v as u8)
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
