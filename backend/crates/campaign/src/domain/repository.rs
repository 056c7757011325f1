//! Repository Traits

use kernel::id::{CampaignId, UserId};

use crate::domain::entity::campaign::{Campaign, NewCampaign};
use crate::domain::entity::campaign_image::{CampaignImage, NewCampaignImage};
use crate::error::CampaignResult;

/// Campaign repository trait. Returned campaigns carry their images.
#[trait_variant::make(CampaignRepository: Send)]
pub trait LocalCampaignRepository {
    /// All campaigns, or only those owned by `owner`, newest first
    async fn list(&self, owner: Option<UserId>) -> CampaignResult<Vec<Campaign>>;

    async fn find_by_id(&self, id: CampaignId) -> CampaignResult<Option<Campaign>>;

    /// Insert and return the stored row. The stored slug is the base with
    /// the new campaign ID appended.
    async fn create(&self, campaign: &NewCampaign) -> CampaignResult<Campaign>;

    /// Persist the editable fields
    async fn update(&self, campaign: &Campaign) -> CampaignResult<()>;

    /// Attach an image. A primary image demotes every other image of the
    /// campaign in the same unit of work.
    async fn add_image(&self, image: &NewCampaignImage) -> CampaignResult<CampaignImage>;
}
