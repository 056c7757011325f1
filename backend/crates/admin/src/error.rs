//! Admin Error Types
//!
//! Errors from the reused use cases keep their kind. Form problems are
//! shown inline on the re-rendered form; anything else becomes an error page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upload::UploadError;
use thiserror::Error;

use crate::presentation::views;

pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Malformed form, path or multipart body
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Account(#[from] account::AccountError),

    #[error(transparent)]
    Campaign(#[from] campaign::CampaignError),

    #[error(transparent)]
    Funding(#[from] funding::FundingError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AdminError::Validation(vec![message.into()])
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::Validation(_) => ErrorKind::UnprocessableEntity,
            AdminError::BadRequest(_) => ErrorKind::BadRequest,
            AdminError::Account(e) => e.kind(),
            AdminError::Campaign(e) => e.kind(),
            AdminError::Funding(e) => e.kind(),
            AdminError::Upload(UploadError::TooLarge { .. }) => ErrorKind::PayloadTooLarge,
            AdminError::Upload(UploadError::Io(_)) => ErrorKind::InternalServerError,
            AdminError::Upload(_) => ErrorKind::UnprocessableEntity,
            AdminError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AdminError::Validation(errors) => AppError::validation(self.to_string(), errors.clone()),
            AdminError::Account(e) => e.to_app_error(),
            AdminError::Campaign(e) => e.to_app_error(),
            AdminError::Funding(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Messages to show next to the form the user submitted, when the
    /// failure is something the user can fix
    pub fn form_errors(&self) -> Option<Vec<String>> {
        let app = self.to_app_error();
        match app.kind() {
            ErrorKind::UnprocessableEntity | ErrorKind::Conflict | ErrorKind::PayloadTooLarge => {
                Some(if app.errors().is_empty() {
                    vec![app.message().to_string()]
                } else {
                    app.errors().to_vec()
                })
            }
            _ => None,
        }
    }

    fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "Admin panel error");
        } else {
            tracing::debug!(error = %self, "Admin panel request rejected");
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.log();
        let app = self.to_app_error();
        (
            self.status_code(),
            views::error_page(self.status_code(), app.public_message()),
        )
            .into_response()
    }
}
