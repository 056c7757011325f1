//! Transaction Entity

use chrono::{DateTime, Utc};
use kernel::id::{CampaignId, TransactionId, UserId};

use crate::domain::value_object::payment_status::PaymentStatus;

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub amount: i64,
    pub status: PaymentStatus,
    /// Order code sent to the gateway
    pub code: String,
    /// Set once the gateway answers
    pub payment_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pending transaction about to be inserted
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub amount: i64,
    pub code: String,
}
