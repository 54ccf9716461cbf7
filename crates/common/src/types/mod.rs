use serde::{Deserialize, Serialize};

/// Fixed-text body used by the liveness probe.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn healthy() -> Self {
        Self { message: "Healthy".to_string() }
    }
}

/// Uniform response envelope for record operations.
///
/// Business failures (not found, duplicate) travel as `success: false` with
/// a readable `message`; `data` is serialized as `null` when absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Outcome<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}
