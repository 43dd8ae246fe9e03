/// Error types for post-service
///
/// Client errors are raised inside handlers with their exact message. Store
/// failures are wrapped at the handler boundary with the route's 500 message.
/// Every error renders as `{"error": "<message>"}`.
use crate::db::{StoreError, StoreResult};
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for post-service handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request fields
    #[error("{0}")]
    BadRequest(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// A store call failed
    #[error("{message}")]
    Server {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Server { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

/// Converts store results into handler results carrying a fixed 500 message
pub trait StoreResultExt<T> {
    fn or_server_error(self, message: &'static str) -> Result<T>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn or_server_error(self, message: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Server { message, source })
    }
}
