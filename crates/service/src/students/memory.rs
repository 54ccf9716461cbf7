use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{new_id, NewStudent, Student};
use super::query::ListFilter;
use super::repository::{StoreOutcome, StudentStore};

#[derive(Default)]
struct Records {
    by_id: HashMap<String, Student>,
    /// insertion order of live ids
    order: Vec<String>,
}

impl Records {
    fn has_identity(&self, name: &str, class: &str, skip_id: Option<&str>) -> bool {
        self.by_id
            .values()
            .filter(|s| Some(s.id.as_str()) != skip_id)
            .any(|s| s.same_identity(name, class))
    }

    fn ordered(&self) -> impl Iterator<Item = &Student> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }
}

/// Process-lifetime in-memory store.
///
/// One `RwLock` guards everything: mutations hold the write lock across the
/// uniqueness scan and the insert/replace, so concurrent callers cannot both
/// pass the duplicate check.
#[derive(Default)]
pub struct InMemoryStudentStore {
    inner: RwLock<Records>,
}

impl InMemoryStudentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self, filter: &ListFilter) -> Vec<Student> {
        let records = self.inner.read().await;
        filter.apply(records.ordered().cloned())
    }

    async fn get(&self, id: &str) -> StoreOutcome {
        let records = self.inner.read().await;
        match records.by_id.get(id) {
            Some(s) => StoreOutcome::Success(s.clone()),
            None => StoreOutcome::NotFound,
        }
    }

    async fn create(&self, input: NewStudent) -> StoreOutcome {
        let mut records = self.inner.write().await;
        if records.has_identity(&input.name, &input.class, None) {
            debug!(total = records.by_id.len(), "duplicate student rejected");
            return StoreOutcome::Duplicate;
        }
        let student = input.into_student(new_id());
        records.order.push(student.id.clone());
        records.by_id.insert(student.id.clone(), student.clone());
        debug!(student_id = %student.id, total = records.by_id.len(), "student inserted");
        StoreOutcome::Success(student)
    }

    async fn update(&self, id: &str, input: NewStudent) -> StoreOutcome {
        let mut records = self.inner.write().await;
        if !records.by_id.contains_key(id) {
            return StoreOutcome::NotFound;
        }
        if records.has_identity(&input.name, &input.class, Some(id)) {
            debug!(student_id = %id, "update collides with another student");
            return StoreOutcome::Duplicate;
        }
        let student = input.into_student(id.to_string());
        records.by_id.insert(student.id.clone(), student.clone());
        debug!(student_id = %id, "student replaced");
        StoreOutcome::Success(student)
    }

    async fn delete(&self, id: &str) -> StoreOutcome {
        let mut records = self.inner.write().await;
        match records.by_id.remove(id) {
            Some(removed) => {
                records.order.retain(|k| k != id);
                debug!(student_id = %id, total = records.by_id.len(), "student removed");
                StoreOutcome::Success(removed)
            }
            None => StoreOutcome::NotFound,
        }
    }

    async fn count(&self) -> usize {
        self.inner.read().await.by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::students::{ListQuery, StudentInput};
    use tokio::sync::Barrier;

    fn new_student(name: &str, class: &str, marks: i64) -> NewStudent {
        StudentInput { name: name.into(), class: class.into(), marks }
            .validate()
            .expect("valid input")
    }

    fn filter(q: ListQuery) -> ListFilter {
        ListFilter::try_from(q).expect("valid query")
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let store = InMemoryStudentStore::new();
        let created = store.create(new_student("Ann Lee", "10A", 88)).await.into_student().unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get(&created.id).await.into_student().unwrap();
        assert_eq!(fetched, created);
        assert_eq!((fetched.name.as_str(), fetched.class.as_str(), fetched.marks), ("Ann Lee", "10A", 88));
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = InMemoryStudentStore::new();
        let a = store.create(new_student("A", "1", 1)).await.into_student().unwrap();
        let b = store.create(new_student("B", "1", 1)).await.into_student().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn duplicate_create_ignores_case_and_keeps_size() {
        let store = InMemoryStudentStore::new();
        assert!(store.create(new_student("Ann Lee", "10A", 88)).await.is_success());
        let out = store.create(new_student("ANN LEE", "10a", 50)).await;
        assert_eq!(out, StoreOutcome::Duplicate);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn same_name_other_class_is_allowed() {
        let store = InMemoryStudentStore::new();
        assert!(store.create(new_student("Ann", "10A", 1)).await.is_success());
        assert!(store.create(new_student("Ann", "10B", 1)).await.is_success());
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = InMemoryStudentStore::new();
        store.create(new_student("Ann", "10A", 1)).await;
        let out = store.update("nope", new_student("Bob", "10A", 2)).await;
        assert_eq!(out, StoreOutcome::NotFound);
        let all = store.list(&ListFilter::default()).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ann");
    }

    #[tokio::test]
    async fn update_replaces_record_and_keeps_id() {
        let store = InMemoryStudentStore::new();
        let ann = store.create(new_student("Ann", "10A", 88)).await.into_student().unwrap();
        let upd = store.update(&ann.id, new_student("Ann", "10A", 92)).await.into_student().unwrap();
        assert_eq!(upd.id, ann.id);
        assert_eq!(upd.marks, 92);
        assert_eq!(store.get(&ann.id).await.into_student().unwrap().marks, 92);
    }

    #[tokio::test]
    async fn update_may_keep_own_identity_but_not_take_another() {
        let store = InMemoryStudentStore::new();
        let ann = store.create(new_student("Ann", "10A", 1)).await.into_student().unwrap();
        let bob = store.create(new_student("Bob", "10A", 2)).await.into_student().unwrap();

        // re-casing its own pair is not a collision
        assert!(store.update(&ann.id, new_student("ANN", "10a", 3)).await.is_success());

        let out = store.update(&bob.id, new_student("ann", "10A", 4)).await;
        assert_eq!(out, StoreOutcome::Duplicate);
        assert_eq!(store.get(&bob.id).await.into_student().unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = InMemoryStudentStore::new();
        let ann = store.create(new_student("Ann", "10A", 1)).await.into_student().unwrap();
        let removed = store.delete(&ann.id).await.into_student().unwrap();
        assert_eq!(removed, ann);
        assert_eq!(store.get(&ann.id).await, StoreOutcome::NotFound);
        assert_eq!(store.delete(&ann.id).await, StoreOutcome::NotFound);
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_across_updates() {
        let store = InMemoryStudentStore::new();
        let a = store.create(new_student("A", "1", 10)).await.into_student().unwrap();
        let b = store.create(new_student("B", "1", 20)).await.into_student().unwrap();
        let c = store.create(new_student("C", "1", 30)).await.into_student().unwrap();
        store.update(&a.id, new_student("A2", "1", 11)).await;
        store.delete(&b.id).await;

        let ids: Vec<String> = store.list(&ListFilter::default()).await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn list_applies_filter_and_sort() {
        let store = InMemoryStudentStore::new();
        store.create(new_student("Ann", "10A", 88)).await;
        store.create(new_student("Bob", "10A", 55)).await;
        store.create(new_student("Cy", "10B", 99)).await;

        let q = ListQuery {
            class: Some("10A".into()),
            sort_by: Some("marks".into()),
            order: Some("desc".into()),
            ..Default::default()
        };
        let names: Vec<String> = store.list(&filter(q)).await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Ann", "Bob"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_creates_admit_one() {
        const TASKS: usize = 8;
        for round in 0..50 {
            let store = InMemoryStudentStore::new();
            let barrier = Arc::new(Barrier::new(TASKS));
            let mut handles = Vec::new();
            for i in 0..TASKS {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                handles.push(tokio::spawn(async move {
                    let name = if i % 2 == 0 { "ann lee" } else { "ANN LEE" };
                    barrier.wait().await;
                    store.create(new_student(name, "10A", i as i64)).await
                }));
            }
            let mut ok = 0;
            for h in handles {
                if h.await.unwrap().is_success() {
                    ok += 1;
                }
            }
            assert_eq!(ok, 1, "round {round}");
            assert_eq!(store.count().await, 1, "round {round}");
        }
    }
}
