use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use common::types::Outcome;
use service::students::{ListFilter, ListQuery, StoreOutcome, Student, StudentInput};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::AppState;

pub const MSG_CREATED: &str = "Student created successfully.";
pub const MSG_UPDATED: &str = "Student updated successfully.";
pub const MSG_DELETED: &str = "Student deleted successfully.";
pub const MSG_RETRIEVED: &str = "Student retrieved successfully.";
pub const MSG_NOT_FOUND: &str = "Student not found.";
pub const MSG_DUPLICATE: &str = "A student with this name and class already exists.";

/// Map a store result onto the wire envelope.
pub fn to_outcome(out: StoreOutcome, success_message: &str) -> Outcome<Student> {
    match out {
        StoreOutcome::Success(s) => Outcome::ok(success_message, s),
        StoreOutcome::NotFound => Outcome::fail(MSG_NOT_FOUND),
        StoreOutcome::Duplicate => Outcome::fail(MSG_DUPLICATE),
    }
}

#[utoipa::path(
    get, path = "/students", tag = "Students",
    params(
        ("class" = Option<String>, Query, description = "Filter by class/section (exact match)"),
        ("min_marks" = Option<i64>, Query, description = "Keep marks >= min_marks (0-100)"),
        ("max_marks" = Option<i64>, Query, description = "Keep marks <= max_marks (0-100)"),
        ("sort_by" = Option<String>, Query, description = "name, class or marks"),
        ("order" = Option<String>, Query, description = "asc (default) or desc")
    ),
    responses(
        (status = 200, description = "Matching students", body = [crate::openapi::StudentDoc]),
        (status = 400, description = "Invalid sort field or bounds")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let Query(q) = query?;
    let filter = ListFilter::try_from(q)?;
    let list = state.store.list(&filter).await;
    info!(count = list.len(), "list students");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/students", tag = "Students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 201, description = "Outcome wrapping the created student", body = crate::openapi::OutcomeDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Outcome<Student>>), ApiError> {
    let Json(input) = body?;
    let new = input.validate()?;
    let out = state.store.create(new).await;
    if let StoreOutcome::Success(s) = &out {
        let total = state.store.count().await;
        info!(student_id = %s.id, total, "created student");
    }
    Ok((StatusCode::CREATED, Json(to_outcome(out, MSG_CREATED))))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "Students",
    params(("id" = String, Path, description = "ID of the student to retrieve")),
    responses((status = 200, description = "Outcome wrapping the student or not-found", body = crate::openapi::OutcomeDoc))
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Outcome<Student>> {
    Json(to_outcome(state.store.get(&id).await, MSG_RETRIEVED))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "Students",
    params(("id" = String, Path, description = "ID of the student to update")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Outcome wrapping the updated student, not-found or duplicate", body = crate::openapi::OutcomeDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<Outcome<Student>>, ApiError> {
    let Json(input) = body?;
    let new = input.validate()?;
    let out = state.store.update(&id, new).await;
    info!(student_id = %id, success = out.is_success(), "update student");
    Ok(Json(to_outcome(out, MSG_UPDATED)))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "Students",
    params(("id" = String, Path, description = "ID of the student to delete")),
    responses((status = 200, description = "Outcome wrapping the removed student or not-found", body = crate::openapi::OutcomeDoc))
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Outcome<Student>> {
    let out = state.store.delete(&id).await;
    let total = state.store.count().await;
    info!(student_id = %id, success = out.is_success(), total, "delete student");
    Json(to_outcome(out, MSG_DELETED))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> Student {
        Student { id: "x".into(), name: "Ann".into(), class: "10A".into(), marks: 1 }
    }

    #[test]
    fn outcome_mapping() {
        let ok = to_outcome(StoreOutcome::Success(ann()), MSG_CREATED);
        assert!(ok.success);
        assert_eq!(ok.message, MSG_CREATED);
        assert_eq!(ok.data, Some(ann()));

        let nf = to_outcome(StoreOutcome::NotFound, MSG_UPDATED);
        assert!(!nf.success);
        assert_eq!(nf.message, MSG_NOT_FOUND);
        assert!(nf.data.is_none());

        let dup = to_outcome(StoreOutcome::Duplicate, MSG_CREATED);
        assert!(dup.message.contains("already exists"));
    }
}
