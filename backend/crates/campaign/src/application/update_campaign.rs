//! Update Campaign Use Case
//!
//! Only the owner (or the admin panel) may edit. The slug is never
//! regenerated.

use std::sync::Arc;

use kernel::id::CampaignId;

use crate::application::create_campaign::CampaignInput;
use crate::domain::actor::Actor;
use crate::domain::entity::campaign::Campaign;
use crate::domain::repository::CampaignRepository;
use crate::error::{CampaignError, CampaignResult};

pub struct UpdateCampaignUseCase<C>
where
    C: CampaignRepository,
{
    campaign_repo: Arc<C>,
}

impl<C> UpdateCampaignUseCase<C>
where
    C: CampaignRepository,
{
    pub fn new(campaign_repo: Arc<C>) -> Self {
        Self { campaign_repo }
    }

    pub async fn execute(
        &self,
        actor: Actor,
        id: CampaignId,
        input: CampaignInput,
    ) -> CampaignResult<Campaign> {
        let mut campaign = self
            .campaign_repo
            .find_by_id(id)
            .await?
            .ok_or(CampaignError::NotFound)?;

        if !actor.can_manage(campaign.user_id) {
            return Err(CampaignError::NotOwner);
        }

        let details = input.validate()?;
        campaign.apply_details(details);
        self.campaign_repo.update(&campaign).await?;

        tracing::info!(campaign_id = %campaign.id, "Campaign updated");

        Ok(campaign)
    }
}
