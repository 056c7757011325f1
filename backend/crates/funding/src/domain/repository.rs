//! Repository Traits

use kernel::id::{CampaignId, TransactionId, UserId};

use crate::domain::entity::transaction::{NewTransaction, Transaction};
use crate::domain::value_object::payment_status::PaymentStatus;
use crate::error::FundingResult;

/// Result of finalizing a transaction
#[derive(Debug, Clone)]
pub enum SettleOutcome {
    /// Moved out of `pending`; campaign credited if now `paid`
    Applied(Transaction),
    /// Already final; nothing changed
    AlreadyFinal(Transaction),
    /// No transaction has this order code
    NotFound,
}

#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Insert a `pending` transaction
    async fn create(&self, transaction: &NewTransaction) -> FundingResult<Transaction>;

    async fn set_payment_url(&self, id: TransactionId, url: &str) -> FundingResult<()>;

    async fn find_by_code(&self, code: &str) -> FundingResult<Option<Transaction>>;

    /// Newest first
    async fn list_by_campaign(&self, campaign_id: CampaignId) -> FundingResult<Vec<Transaction>>;

    /// Newest first
    async fn list_by_user(&self, user_id: UserId) -> FundingResult<Vec<Transaction>>;

    /// Newest first
    async fn list_all(&self) -> FundingResult<Vec<Transaction>>;

    /// Compare-and-swap `pending` -> `status` for the order `code`.
    /// When it lands on `paid`, the campaign's `current_amount` grows by the
    /// transaction amount and `backer_count` by one, atomically with the swap.
    async fn settle(&self, code: &str, status: PaymentStatus) -> FundingResult<SettleOutcome>;
}
