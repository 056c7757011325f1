//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use platform::upload::UploadError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Input failed validation (one message per field problem)
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Email already registered
    #[error("Email has been registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Unauthorized")]
    Unauthenticated,

    /// Bearer token rejected
    #[error("Unauthorized: {0}")]
    Token(#[from] TokenError),

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Upload rejected or could not be stored
    #[error("Failed to upload avatar image: {0}")]
    Upload(#[from] UploadError),

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Single-field validation failure
    pub fn invalid(message: impl Into<String>) -> Self {
        AccountError::Validation(vec![message.into()])
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) | AccountError::InvalidCredentials => {
                ErrorKind::UnprocessableEntity
            }
            AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::Unauthenticated => ErrorKind::Unauthorized,
            AccountError::Token(TokenError::Issue(_)) => ErrorKind::InternalServerError,
            AccountError::Token(_) => ErrorKind::Unauthorized,
            AccountError::UserNotFound => ErrorKind::NotFound,
            AccountError::Upload(UploadError::TooLarge { .. }) => ErrorKind::PayloadTooLarge,
            AccountError::Upload(UploadError::Io(_)) => ErrorKind::InternalServerError,
            AccountError::Upload(_) => ErrorKind::UnprocessableEntity,
            AccountError::PasswordHash(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation(errors) => {
                AppError::validation(self.to_string(), errors.clone())
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AccountError::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "Avatar write failed");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::Token(e) => {
                tracing::info!(error = %e, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::UnprocessableEntity | ErrorKind::BadRequest => {
                if err.errors().is_empty() {
                    AccountError::invalid(err.message().to_string())
                } else {
                    AccountError::Validation(err.errors().to_vec())
                }
            }
            _ => AccountError::Internal(err.to_string()),
        }
    }
}
