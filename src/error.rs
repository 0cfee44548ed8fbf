use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PawtrackError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
}

impl PawtrackError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl IntoResponse for PawtrackError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            PawtrackError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            PawtrackError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            PawtrackError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            PawtrackError::PermissionDenied => {
                (StatusCode::FORBIDDEN, "Permission denied".to_string())
            }
            PawtrackError::IncorrectPassword => {
                (StatusCode::UNAUTHORIZED, "Incorrect password".to_string())
            }
            // The storage error text is surfaced verbatim, matching the
            // service this replaces. It leaks engine detail to the caller.
            PawtrackError::Database(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };
        (status, Json(MessageBody { message })).into_response()
    }
}

/// `{"message": "..."}` — the error/status envelope used across all endpoints.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}
