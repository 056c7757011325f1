//! List Transactions Use Case
//!
//! Transactions joined with their campaign and payer for the formatters.

use std::collections::HashMap;
use std::sync::Arc;

use account::{User, UserRepository};
use campaign::{Actor, Campaign, CampaignRepository};
use kernel::id::{CampaignId, UserId};

use crate::domain::entity::transaction::Transaction;
use crate::domain::repository::TransactionRepository;
use crate::error::{FundingError, FundingResult};

#[derive(Debug, Clone)]
pub struct TransactionView {
    pub transaction: Transaction,
    pub campaign: Option<Campaign>,
    pub user: Option<User>,
}

pub struct ListTransactionsUseCase<T, C, U>
where
    T: TransactionRepository,
    C: CampaignRepository,
    U: UserRepository,
{
    transaction_repo: Arc<T>,
    campaign_repo: Arc<C>,
    user_repo: Arc<U>,
}

impl<T, C, U> ListTransactionsUseCase<T, C, U>
where
    T: TransactionRepository,
    C: CampaignRepository,
    U: UserRepository,
{
    pub fn new(transaction_repo: Arc<T>, campaign_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        Self {
            transaction_repo,
            campaign_repo,
            user_repo,
        }
    }

    /// A campaign's transactions; only its owner (or the admin panel) may look
    pub async fn by_campaign(
        &self,
        actor: Actor,
        campaign_id: CampaignId,
    ) -> FundingResult<Vec<TransactionView>> {
        let campaign = self
            .campaign_repo
            .find_by_id(campaign_id)
            .await?
            .ok_or(FundingError::CampaignNotFound)?;

        if !actor.can_manage(campaign.user_id) {
            return Err(FundingError::NotOwner);
        }

        let transactions = self.transaction_repo.list_by_campaign(campaign_id).await?;
        let users = self.load_users(&transactions).await?;

        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionView {
                user: users.get(&transaction.user_id).cloned(),
                campaign: Some(campaign.clone()),
                transaction,
            })
            .collect())
    }

    /// The payer's own transactions with campaign info
    pub async fn by_user(&self, user_id: UserId) -> FundingResult<Vec<TransactionView>> {
        let transactions = self.transaction_repo.list_by_user(user_id).await?;
        let campaigns = self.load_campaigns(&transactions).await?;

        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionView {
                campaign: campaigns.get(&transaction.campaign_id).cloned(),
                user: None,
                transaction,
            })
            .collect())
    }

    /// Everything, for the admin panel
    pub async fn all(&self) -> FundingResult<Vec<TransactionView>> {
        let transactions = self.transaction_repo.list_all().await?;
        let campaigns = self.load_campaigns(&transactions).await?;
        let users = self.load_users(&transactions).await?;

        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionView {
                campaign: campaigns.get(&transaction.campaign_id).cloned(),
                user: users.get(&transaction.user_id).cloned(),
                transaction,
            })
            .collect())
    }

    async fn load_campaigns(
        &self,
        transactions: &[Transaction],
    ) -> FundingResult<HashMap<CampaignId, Campaign>> {
        let mut campaigns = HashMap::new();
        for transaction in transactions {
            if campaigns.contains_key(&transaction.campaign_id) {
                continue;
            }
            if let Some(campaign) = self.campaign_repo.find_by_id(transaction.campaign_id).await? {
                campaigns.insert(transaction.campaign_id, campaign);
            }
        }
        Ok(campaigns)
    }

    async fn load_users(&self, transactions: &[Transaction]) -> FundingResult<HashMap<UserId, User>> {
        let mut users = HashMap::new();
        for transaction in transactions {
            if users.contains_key(&transaction.user_id) {
                continue;
            }
            if let Some(user) = self.user_repo.find_by_id(transaction.user_id).await? {
                users.insert(transaction.user_id, user);
            }
        }
        Ok(users)
    }
}
