//! Funding Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::gateway::GatewayError;

pub type FundingResult<T> = Result<T, FundingError>;

#[derive(Debug, Error)]
pub enum FundingError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Campaign not found")]
    CampaignNotFound,

    /// Goal already reached
    #[error("Campaign is no longer accepting funds")]
    CampaignClosed,

    #[error("Not an owner of the campaign")]
    NotOwner,

    /// Notification for an unknown order code
    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Invalid notification signature")]
    InvalidSignature,

    /// Signed notification whose gross amount differs from the pledge
    #[error("Notification amount does not match the transaction")]
    AmountMismatch,

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FundingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FundingError::Validation(vec![message.into()])
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FundingError::Validation(_)
            | FundingError::CampaignClosed
            | FundingError::AmountMismatch => ErrorKind::UnprocessableEntity,
            FundingError::CampaignNotFound | FundingError::TransactionNotFound => {
                ErrorKind::NotFound
            }
            FundingError::NotOwner => ErrorKind::Forbidden,
            FundingError::InvalidSignature => ErrorKind::Unauthorized,
            FundingError::Gateway(_) => ErrorKind::BadGateway,
            FundingError::Database(_) | FundingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            FundingError::Validation(errors) => {
                AppError::validation(self.to_string(), errors.clone())
            }
            // Gateway detail stays in the logs
            FundingError::Gateway(_) => AppError::bad_gateway("Payment gateway error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            FundingError::Database(e) => {
                tracing::error!(error = %e, "Funding database error");
            }
            FundingError::Internal(msg) => {
                tracing::error!(message = %msg, "Funding internal error");
            }
            FundingError::Gateway(e) => {
                tracing::error!(error = %e, "Payment gateway call failed");
            }
            FundingError::InvalidSignature => {
                tracing::warn!("Gateway notification with invalid signature");
            }
            FundingError::TransactionNotFound => {
                tracing::warn!("Gateway notification for unknown order");
            }
            FundingError::AmountMismatch => {
                tracing::warn!("Gateway notification amount mismatch");
            }
            FundingError::NotOwner => {
                tracing::warn!("Campaign transactions requested by non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Funding error");
            }
        }
    }
}

impl IntoResponse for FundingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for FundingError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::UnprocessableEntity | ErrorKind::BadRequest => {
                if err.errors().is_empty() {
                    FundingError::invalid(err.message().to_string())
                } else {
                    FundingError::Validation(err.errors().to_vec())
                }
            }
            _ => FundingError::Internal(err.to_string()),
        }
    }
}

impl From<campaign::CampaignError> for FundingError {
    fn from(err: campaign::CampaignError) -> Self {
        match err {
            campaign::CampaignError::NotFound => FundingError::CampaignNotFound,
            campaign::CampaignError::Database(e) => FundingError::Database(e),
            other => FundingError::Internal(other.to_string()),
        }
    }
}

impl From<account::AccountError> for FundingError {
    fn from(err: account::AccountError) -> Self {
        match err {
            account::AccountError::Database(e) => FundingError::Database(e),
            other => FundingError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FundingError::InvalidSignature.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(FundingError::TransactionNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            FundingError::CampaignClosed.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            FundingError::Gateway(GatewayError::Unavailable("timeout".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_gateway_detail_is_not_exposed() {
        let err = FundingError::Gateway(GatewayError::Rejected {
            status: 401,
            message: "server key SB-Mid-server-xyz invalid".into(),
        });
        assert!(!err.to_app_error().message().contains("SB-Mid"));
    }
}
