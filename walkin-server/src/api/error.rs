//! API error type and its JSON response mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by queue API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required body field is absent or null
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Body is not valid JSON, has wrong types, or a path parameter is not an integer
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// No queue row with this id
    #[error("Queue not found: {0}")]
    QueueNotFound(i64),

    /// Database failure (I/O, constraint violation, pool timeout)
    #[error("Storage failure: {0}")]
    Storage(#[from] walkin_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::QueueNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Storage(walkin_common::Error::Database(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::MissingField(field) => {
                warn!("Client error: {}", self);
                json!({ "error": self.to_string(), "field": field })
            }
            ApiError::MalformedRequest(_) | ApiError::QueueNotFound(_) => {
                warn!("Client error: {}", self);
                json!({ "error": self.to_string() })
            }
            ApiError::Storage(_) => {
                // Cause stays in the log
                error!("Server error: {}", self);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
