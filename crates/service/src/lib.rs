//! Service layer for student records.
//! - Validates request input before any store access.
//! - Owns the filter/sort rules applied to listings.
//! - Exposes the record store behind the `StudentStore` trait.

pub mod errors;
pub mod students;
