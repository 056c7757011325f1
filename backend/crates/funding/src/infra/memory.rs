//! In-Memory Repository Implementation
//!
//! Settling as `paid` credits the shared [`InMemoryCampaignRepository`] while
//! the transaction lock is held, mirroring the single database transaction
//! of the PostgreSQL repository.

use std::sync::{Arc, Mutex, MutexGuard};

use campaign::InMemoryCampaignRepository;
use chrono::Utc;
use kernel::id::{CampaignId, TransactionId, UserId};

use crate::domain::entity::transaction::{NewTransaction, Transaction};
use crate::domain::repository::{SettleOutcome, TransactionRepository};
use crate::domain::value_object::payment_status::PaymentStatus;
use crate::error::{FundingError, FundingResult};

#[derive(Clone)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<Mutex<Vec<Transaction>>>,
    campaigns: Arc<InMemoryCampaignRepository>,
}

impl InMemoryTransactionRepository {
    pub fn new(campaigns: Arc<InMemoryCampaignRepository>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(Vec::new())),
            campaigns,
        }
    }

    /// Synchronous lookup for assertions
    pub fn find(&self, code: &str) -> Option<Transaction> {
        self.lock().iter().find(|t| t.code == code).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Transaction>> {
        self.transactions.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn newest_first(&self, keep: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        self.lock().iter().rev().filter(|t| keep(t)).cloned().collect()
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    async fn create(&self, transaction: &NewTransaction) -> FundingResult<Transaction> {
        let mut transactions = self.lock();
        if transactions.iter().any(|t| t.code == transaction.code) {
            return Err(FundingError::Internal(format!(
                "duplicate order code {}",
                transaction.code
            )));
        }

        let now = Utc::now();
        let stored = Transaction {
            id: TransactionId::from_raw(transactions.len() as i64 + 1),
            campaign_id: transaction.campaign_id,
            user_id: transaction.user_id,
            amount: transaction.amount,
            status: PaymentStatus::Pending,
            code: transaction.code.clone(),
            payment_url: None,
            created_at: now,
            updated_at: now,
        };
        transactions.push(stored.clone());

        Ok(stored)
    }

    async fn set_payment_url(&self, id: TransactionId, url: &str) -> FundingResult<()> {
        if let Some(slot) = self.lock().iter_mut().find(|t| t.id == id) {
            slot.payment_url = Some(url.to_string());
            slot.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> FundingResult<Option<Transaction>> {
        Ok(self.find(code))
    }

    async fn list_by_campaign(&self, campaign_id: CampaignId) -> FundingResult<Vec<Transaction>> {
        Ok(self.newest_first(|t| t.campaign_id == campaign_id))
    }

    async fn list_by_user(&self, user_id: UserId) -> FundingResult<Vec<Transaction>> {
        Ok(self.newest_first(|t| t.user_id == user_id))
    }

    async fn list_all(&self) -> FundingResult<Vec<Transaction>> {
        Ok(self.newest_first(|_| true))
    }

    async fn settle(&self, code: &str, status: PaymentStatus) -> FundingResult<SettleOutcome> {
        let mut transactions = self.lock();
        let Some(slot) = transactions.iter_mut().find(|t| t.code == code) else {
            return Ok(SettleOutcome::NotFound);
        };

        if slot.status.is_final() {
            return Ok(SettleOutcome::AlreadyFinal(slot.clone()));
        }

        if status == PaymentStatus::Paid && !self.campaigns.credit(slot.campaign_id, slot.amount) {
            return Err(FundingError::Internal(format!(
                "campaign {} missing for transaction {}",
                slot.campaign_id, slot.id
            )));
        }

        slot.status = status;
        slot.updated_at = Utc::now();

        Ok(SettleOutcome::Applied(slot.clone()))
    }
}
