//! Create Campaign Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::campaign::{Campaign, NewCampaign};
use crate::domain::repository::CampaignRepository;
use crate::domain::value_object::{campaign_details::CampaignDetails, slug::campaign_slug};
use crate::error::{CampaignError, CampaignResult};

/// Campaign form fields (create and update)
pub struct CampaignInput {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub perks: String,
    pub goal_amount: i64,
}

impl CampaignInput {
    pub(crate) fn validate(&self) -> CampaignResult<CampaignDetails> {
        CampaignDetails::new(
            &self.name,
            &self.short_description,
            &self.description,
            &self.perks,
            self.goal_amount,
        )
        .map_err(CampaignError::Validation)
    }
}

pub struct CreateCampaignUseCase<C>
where
    C: CampaignRepository,
{
    campaign_repo: Arc<C>,
}

impl<C> CreateCampaignUseCase<C>
where
    C: CampaignRepository,
{
    pub fn new(campaign_repo: Arc<C>) -> Self {
        Self { campaign_repo }
    }

    /// Create a campaign owned by `owner`
    pub async fn execute(&self, owner: UserId, input: CampaignInput) -> CampaignResult<Campaign> {
        let details = input.validate()?;
        let slug_base = campaign_slug(&details.name, owner.get());

        let campaign = self
            .campaign_repo
            .create(&NewCampaign {
                user_id: owner,
                details,
                slug_base,
            })
            .await?;

        tracing::info!(
            campaign_id = %campaign.id,
            user_id = %owner,
            slug = %campaign.slug,
            "Campaign created"
        );

        Ok(campaign)
    }
}
