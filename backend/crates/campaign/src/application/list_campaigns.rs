//! List Campaigns Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::campaign::Campaign;
use crate::domain::repository::CampaignRepository;
use crate::error::CampaignResult;

pub struct ListCampaignsUseCase<C>
where
    C: CampaignRepository,
{
    campaign_repo: Arc<C>,
}

impl<C> ListCampaignsUseCase<C>
where
    C: CampaignRepository,
{
    pub fn new(campaign_repo: Arc<C>) -> Self {
        Self { campaign_repo }
    }

    /// All campaigns, or only `owner`'s
    pub async fn execute(&self, owner: Option<UserId>) -> CampaignResult<Vec<Campaign>> {
        self.campaign_repo.list(owner).await
    }
}
