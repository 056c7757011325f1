//! Get Campaign Use Case
//!
//! Loads a campaign with its images and a summary of its owner.

use std::sync::Arc;

use account::{User, UserRepository};
use kernel::id::CampaignId;

use crate::domain::entity::campaign::Campaign;
use crate::domain::repository::CampaignRepository;
use crate::error::{CampaignError, CampaignResult};

#[derive(Debug)]
pub struct CampaignDetailOutput {
    pub campaign: Campaign,
    /// `None` only if the owner row is gone
    pub owner: Option<User>,
}

pub struct GetCampaignUseCase<C, U>
where
    C: CampaignRepository,
    U: UserRepository,
{
    campaign_repo: Arc<C>,
    user_repo: Arc<U>,
}

impl<C, U> GetCampaignUseCase<C, U>
where
    C: CampaignRepository,
    U: UserRepository,
{
    pub fn new(campaign_repo: Arc<C>, user_repo: Arc<U>) -> Self {
        Self {
            campaign_repo,
            user_repo,
        }
    }

    pub async fn execute(&self, id: CampaignId) -> CampaignResult<CampaignDetailOutput> {
        let campaign = self
            .campaign_repo
            .find_by_id(id)
            .await?
            .ok_or(CampaignError::NotFound)?;

        let owner = self
            .user_repo
            .find_by_id(campaign.user_id)
            .await
            .map_err(|e| CampaignError::Internal(e.to_string()))?;

        Ok(CampaignDetailOutput { campaign, owner })
    }
}
