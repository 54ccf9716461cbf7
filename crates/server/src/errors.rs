use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::warn;

/// Client-facing request error, answered with body
/// `{"error": <title>, "message": <detail>}`. Everything is a 400 except a
/// body that cannot be read (size limit), which keeps its own status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Service(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, "Validation Error", msg.clone()),
            Self::Service(ServiceError::InvalidArgument(msg)) => (StatusCode::BAD_REQUEST, "Invalid Argument", msg.clone()),
            Self::Body(rej @ JsonRejection::BytesRejection(_)) => (rej.status(), "Unreadable Body", rej.body_text()),
            Self::Body(rej) => (StatusCode::BAD_REQUEST, "Validation Error", rej.body_text()),
            Self::Query(rej) => (StatusCode::BAD_REQUEST, "Invalid Query", rej.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, message) = self.parts();
        warn!(%status, error = %title, %message, "request rejected");
        (status, Json(serde_json::json!({"error": title, "message": message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
