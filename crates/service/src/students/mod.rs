//! Student records: model, input validation, listing rules and storage.

pub mod domain;
pub mod memory;
pub mod query;
pub mod repository;

pub use domain::{NewStudent, Student, StudentInput};
pub use memory::InMemoryStudentStore;
pub use query::{ListFilter, ListQuery, SortField, SortOrder};
pub use repository::{StoreOutcome, StudentStore};
