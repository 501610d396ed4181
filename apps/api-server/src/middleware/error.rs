//! Error handling - maps every failure onto the `{"error": ...}` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use arkhon_core::error::{DomainError, RepoError, ValidationError};
use arkhon_shared::ErrorResponse;

/// Application-level error type returned by handlers and extractors.
///
/// Only validation failures carry caller-specific detail; everything else
/// maps to a fixed message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad body format: {0}")]
    BadBody(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Duplicate username or email")]
    Conflict,

    #[error("User not found")]
    NotFound,

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadBody(_)
            | AppError::Validation(_)
            | AppError::Conflict
            | AppError::NotFound
            | AppError::PasswordMismatch => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadBody(detail) => {
                tracing::debug!("Rejected request body: {}", detail);
                ErrorResponse::bad_body()
            }
            AppError::Validation(err) => ErrorResponse::field(err.field, err.message.clone()),
            AppError::Conflict => ErrorResponse::message(ErrorResponse::DUPLICATE_USER),
            AppError::NotFound => ErrorResponse::message(ErrorResponse::NO_USER),
            AppError::PasswordMismatch => ErrorResponse::message(ErrorResponse::PASSWORD_MISMATCH),
            AppError::Unauthorized(detail) => {
                tracing::warn!("Rejected credentials: {}", detail);
                ErrorResponse::unauthorized()
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(err) => AppError::Validation(err),
            DomainError::Duplicate => AppError::Conflict,
            DomainError::NotFound => AppError::NotFound,
            DomainError::PasswordMismatch => AppError::PasswordMismatch,
            DomainError::Token(err) => AppError::Unauthorized(err.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
