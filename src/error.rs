//! Error types for the books API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::secrets::SecretError;

/// Body sent for rejected API keys
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid API key";

/// Body sent for any unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// == API Error Enum ==
/// Unified error type for the books API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, blank or mismatched API key
    #[error("Unauthorized: Invalid API key")]
    Unauthorized,

    /// Target book does not exist
    #[error("{0}")]
    NotFound(String),

    /// Body could not be parsed into the expected shape
    #[error("{0}")]
    BadInput(String),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Secret lookup failure
    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),

    /// Any other unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// 404 with the standard body.
    pub fn book_not_found() -> Self {
        ApiError::NotFound("Book not found".to_string())
    }

    /// 400 with the standard body.
    pub fn invalid_json() -> Self {
        ApiError::BadInput("Invalid JSON".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Secret(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            ApiError::NotFound(msg) | ApiError::BadInput(msg) => msg.clone(),
            ApiError::Database(_) | ApiError::Secret(_) | ApiError::Internal(_) => {
                // Emitted inside the handler's span, so the operation is attached
                error!(error = %self, "Request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the books API.
pub type Result<T> = std::result::Result<T, ApiError>;
