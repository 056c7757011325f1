//! Gateway Notification Use Case
//!
//! Notifications are authenticated by
//! `hex(SHA-512(order_id + status_code + gross_amount + server_key))` and
//! may be delivered more than once. Only the first final status is applied,
//! and only when the notified gross amount equals the pledged amount.

use std::sync::Arc;

use platform::crypto::{constant_time_eq, sha512_hex};

use crate::application::config::FundingConfig;
use crate::domain::entity::transaction::Transaction;
use crate::domain::repository::{SettleOutcome, TransactionRepository};
use crate::domain::value_object::payment_status::PaymentStatus;
use crate::error::{FundingError, FundingResult};

/// Gateway callback payload
#[derive(Debug, Clone)]
pub struct Notification {
    pub order_id: String,
    pub transaction_status: String,
    pub payment_type: Option<String>,
    pub fraud_status: Option<String>,
    pub status_code: String,
    pub gross_amount: String,
    pub signature_key: String,
}

#[derive(Debug, Clone)]
pub enum NotificationOutcome {
    /// Transaction finalized now
    Applied(Transaction),
    /// Transaction was already final; replay acknowledged
    Replayed(Transaction),
    /// Status that does not finalize anything (e.g. `pending`)
    Ignored,
}

impl NotificationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationOutcome::Applied(_) => "applied",
            NotificationOutcome::Replayed(_) => "replayed",
            NotificationOutcome::Ignored => "ignored",
        }
    }
}

/// Expected `signature_key` for a notification
pub fn notification_signature(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
) -> String {
    sha512_hex(format!("{order_id}{status_code}{gross_amount}{server_key}").as_bytes())
}

/// Whole amount from a gateway decimal string such as `"50000.00"`.
/// A non-zero fraction yields `None`; pledges are whole units.
fn parse_gross_amount(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b == b'0')
    {
        return None;
    }
    whole.parse().ok()
}

pub struct HandleNotificationUseCase<T>
where
    T: TransactionRepository,
{
    transaction_repo: Arc<T>,
    config: Arc<FundingConfig>,
}

impl<T> HandleNotificationUseCase<T>
where
    T: TransactionRepository,
{
    pub fn new(transaction_repo: Arc<T>, config: Arc<FundingConfig>) -> Self {
        Self {
            transaction_repo,
            config,
        }
    }

    pub async fn execute(&self, notification: Notification) -> FundingResult<NotificationOutcome> {
        let expected = notification_signature(
            &notification.order_id,
            &notification.status_code,
            &notification.gross_amount,
            &self.config.server_key,
        );
        let provided = notification.signature_key.trim().to_ascii_lowercase();
        if !constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
            return Err(FundingError::InvalidSignature);
        }

        let Some(transaction) = self
            .transaction_repo
            .find_by_code(&notification.order_id)
            .await?
        else {
            tracing::warn!(order_id = %notification.order_id, "Notification for unknown order");
            return Err(FundingError::TransactionNotFound);
        };

        if parse_gross_amount(&notification.gross_amount) != Some(transaction.amount) {
            tracing::warn!(
                order_id = %notification.order_id,
                gross_amount = %notification.gross_amount,
                amount = transaction.amount,
                "Notification amount differs from the transaction"
            );
            return Err(FundingError::AmountMismatch);
        }

        let Some(status) = PaymentStatus::from_gateway(
            &notification.transaction_status,
            notification.fraud_status.as_deref(),
        ) else {
            tracing::info!(
                order_id = %notification.order_id,
                transaction_status = %notification.transaction_status,
                "Notification does not finalize the transaction"
            );
            return Ok(NotificationOutcome::Ignored);
        };

        match self
            .transaction_repo
            .settle(&notification.order_id, status)
            .await?
        {
            SettleOutcome::Applied(transaction) => {
                tracing::info!(
                    transaction_id = %transaction.id,
                    order_id = %transaction.code,
                    status = %transaction.status,
                    payment_type = notification.payment_type.as_deref().unwrap_or(""),
                    "Transaction finalized"
                );
                Ok(NotificationOutcome::Applied(transaction))
            }
            SettleOutcome::AlreadyFinal(transaction) => {
                tracing::info!(
                    transaction_id = %transaction.id,
                    order_id = %transaction.code,
                    status = %transaction.status,
                    "Notification replay ignored"
                );
                Ok(NotificationOutcome::Replayed(transaction))
            }
            SettleOutcome::NotFound => {
                tracing::warn!(order_id = %notification.order_id, "Notification for unknown order");
                Err(FundingError::TransactionNotFound)
            }
        }
    }
}
