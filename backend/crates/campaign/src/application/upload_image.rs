//! Upload Campaign Image Use Case

use std::sync::Arc;

use kernel::id::CampaignId;

use crate::application::config::CampaignConfig;
use crate::domain::actor::Actor;
use crate::domain::entity::campaign_image::{CampaignImage, NewCampaignImage};
use crate::domain::repository::CampaignRepository;
use crate::error::{CampaignError, CampaignResult};

pub struct UploadImageInput<'a> {
    pub campaign_id: CampaignId,
    pub is_primary: bool,
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

pub struct UploadImageUseCase<C>
where
    C: CampaignRepository,
{
    campaign_repo: Arc<C>,
    config: Arc<CampaignConfig>,
}

impl<C> UploadImageUseCase<C>
where
    C: CampaignRepository,
{
    pub fn new(campaign_repo: Arc<C>, config: Arc<CampaignConfig>) -> Self {
        Self {
            campaign_repo,
            config,
        }
    }

    pub async fn execute(&self, actor: Actor, input: UploadImageInput<'_>) -> CampaignResult<CampaignImage> {
        let campaign = self
            .campaign_repo
            .find_by_id(input.campaign_id)
            .await?
            .ok_or(CampaignError::NotFound)?;

        if !actor.can_manage(campaign.user_id) {
            return Err(CampaignError::NotOwner);
        }

        // Named after the owner, like avatars
        let staged = self
            .config
            .uploads
            .stage(campaign.user_id.get(), input.file_name, input.bytes)
            .await?;

        let added = self
            .campaign_repo
            .add_image(&NewCampaignImage {
                campaign_id: campaign.id,
                file_name: staged.path().to_string(),
                is_primary: input.is_primary,
            })
            .await;
        let image = match added {
            Ok(image) => image,
            Err(e) => {
                staged.discard().await;
                return Err(e);
            }
        };
        staged.commit().await?;

        tracing::info!(
            campaign_id = %campaign.id,
            image_id = %image.id,
            is_primary = image.is_primary,
            "Campaign image saved"
        );

        Ok(image)
    }
}
