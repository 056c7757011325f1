//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{CreateTransactionInput, Notification, NotificationOutcome, TransactionView};
use crate::domain::entity::transaction::Transaction;
use kernel::id::CampaignId;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub campaign_id: i64,
    pub amount: i64,
}

impl From<CreateTransactionRequest> for CreateTransactionInput {
    fn from(req: CreateTransactionRequest) -> Self {
        CreateTransactionInput {
            campaign_id: CampaignId::from_raw(req.campaign_id),
            amount: req.amount,
        }
    }
}

/// Gateway callback body; every field arrives as a string
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub transaction_status: String,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub fraud_status: Option<String>,
    #[serde(default)]
    pub status_code: String,
    #[serde(default)]
    pub gross_amount: String,
    #[serde(default)]
    pub signature_key: String,
}

impl From<NotificationRequest> for Notification {
    fn from(req: NotificationRequest) -> Self {
        Notification {
            order_id: req.order_id,
            transaction_status: req.transaction_status,
            payment_type: req.payment_type,
            fraud_status: req.fraud_status,
            status_code: req.status_code,
            gross_amount: req.gross_amount,
            signature_key: req.signature_key,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub status: String,
    pub code: String,
    pub payment_url: String,
}

impl From<&Transaction> for TransactionResponse {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.get(),
            campaign_id: transaction.campaign_id.get(),
            user_id: transaction.user_id.get(),
            amount: transaction.amount,
            status: transaction.status.to_string(),
            code: transaction.code.clone(),
            payment_url: transaction.payment_url.clone().unwrap_or_default(),
        }
    }
}

/// Row of a campaign's backer list
#[derive(Debug, Clone, Serialize)]
pub struct CampaignTransactionResponse {
    pub id: i64,
    /// Backer name
    pub name: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&TransactionView> for CampaignTransactionResponse {
    fn from(view: &TransactionView) -> Self {
        Self {
            id: view.transaction.id.get(),
            name: view.user.as_ref().map(|u| u.name.clone()).unwrap_or_default(),
            amount: view.transaction.amount,
            created_at: view.transaction.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionCampaignResponse {
    pub name: String,
    pub image_url: String,
}

/// Row of the payer's own history
#[derive(Debug, Clone, Serialize)]
pub struct UserTransactionResponse {
    pub id: i64,
    pub amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub campaign: TransactionCampaignResponse,
}

impl From<&TransactionView> for UserTransactionResponse {
    fn from(view: &TransactionView) -> Self {
        let campaign = view.campaign.as_ref();
        Self {
            id: view.transaction.id.get(),
            amount: view.transaction.amount,
            status: view.transaction.status.to_string(),
            created_at: view.transaction.created_at,
            campaign: TransactionCampaignResponse {
                name: campaign.map(|c| c.name.clone()).unwrap_or_default(),
                image_url: campaign
                    .and_then(|c| c.primary_image())
                    .map(|image| image.file_name.clone())
                    .unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub order_id: String,
    /// `applied`, `replayed` or `ignored`
    pub result: &'static str,
}

impl NotificationResponse {
    pub fn new(order_id: String, outcome: &NotificationOutcome) -> Self {
        Self {
            order_id,
            result: outcome.label(),
        }
    }
}
