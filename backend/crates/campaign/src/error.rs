//! Campaign Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upload::UploadError;
use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Campaign not found")]
    NotFound,

    /// Acting on another user's campaign
    #[error("Not an owner of the campaign")]
    NotOwner,

    #[error("Failed to upload campaign image: {0}")]
    Upload(#[from] UploadError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CampaignError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CampaignError::Validation(vec![message.into()])
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CampaignError::Validation(_) => ErrorKind::UnprocessableEntity,
            CampaignError::NotFound => ErrorKind::NotFound,
            CampaignError::NotOwner => ErrorKind::Forbidden,
            CampaignError::Upload(UploadError::TooLarge { .. }) => ErrorKind::PayloadTooLarge,
            CampaignError::Upload(UploadError::Io(_)) => ErrorKind::InternalServerError,
            CampaignError::Upload(_) => ErrorKind::UnprocessableEntity,
            CampaignError::Database(_) | CampaignError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CampaignError::Validation(errors) => {
                AppError::validation(self.to_string(), errors.clone())
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CampaignError::Database(e) => {
                tracing::error!(error = %e, "Campaign database error");
            }
            CampaignError::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "Campaign image write failed");
            }
            CampaignError::Internal(msg) => {
                tracing::error!(message = %msg, "Campaign internal error");
            }
            CampaignError::NotOwner => {
                tracing::warn!("Campaign write attempted by non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Campaign error");
            }
        }
    }
}

impl IntoResponse for CampaignError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CampaignError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::UnprocessableEntity | ErrorKind::BadRequest => {
                if err.errors().is_empty() {
                    CampaignError::invalid(err.message().to_string())
                } else {
                    CampaignError::Validation(err.errors().to_vec())
                }
            }
            ErrorKind::NotFound => CampaignError::NotFound,
            _ => CampaignError::Internal(err.to_string()),
        }
    }
}
