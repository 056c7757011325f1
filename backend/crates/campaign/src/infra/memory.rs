//! In-Memory Repository Implementation
//!
//! Backs the test suites of this crate and of the crates layered on it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::id::{CampaignId, CampaignImageId, UserId};

use crate::domain::entity::campaign::{Campaign, NewCampaign};
use crate::domain::entity::campaign_image::{CampaignImage, NewCampaignImage};
use crate::domain::repository::CampaignRepository;
use crate::domain::value_object::slug::with_campaign_id;
use crate::error::{CampaignError, CampaignResult};

#[derive(Default)]
struct State {
    campaigns: Vec<Campaign>,
    next_image_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryCampaignRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous lookup for assertions
    pub fn find(&self, id: CampaignId) -> Option<Campaign> {
        self.lock().campaigns.iter().find(|c| c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a confirmed pledge to the running totals
    pub fn credit(&self, id: CampaignId, amount: i64) -> bool {
        let mut state = self.lock();
        match state.campaigns.iter_mut().find(|c| c.id == id) {
            Some(campaign) => {
                campaign.current_amount += amount;
                campaign.backer_count += 1;
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CampaignRepository for InMemoryCampaignRepository {
    async fn list(&self, owner: Option<UserId>) -> CampaignResult<Vec<Campaign>> {
        Ok(self
            .lock()
            .campaigns
            .iter()
            .rev()
            .filter(|c| owner.is_none_or(|id| c.user_id == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: CampaignId) -> CampaignResult<Option<Campaign>> {
        Ok(self.find(id))
    }

    async fn create(&self, campaign: &NewCampaign) -> CampaignResult<Campaign> {
        let mut state = self.lock();
        let id = state.campaigns.len() as i64 + 1;

        let now = Utc::now();
        let details = campaign.details.clone();
        let stored = Campaign {
            id: CampaignId::from_raw(id),
            user_id: campaign.user_id,
            name: details.name,
            short_description: details.short_description,
            description: details.description,
            perks: details.perks,
            backer_count: 0,
            goal_amount: details.goal_amount,
            current_amount: 0,
            slug: with_campaign_id(&campaign.slug_base, id),
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.campaigns.push(stored.clone());

        Ok(stored)
    }

    async fn update(&self, campaign: &Campaign) -> CampaignResult<()> {
        let mut state = self.lock();
        let slot = state
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign.id)
            .ok_or(CampaignError::NotFound)?;

        slot.name = campaign.name.clone();
        slot.short_description = campaign.short_description.clone();
        slot.description = campaign.description.clone();
        slot.perks = campaign.perks.clone();
        slot.goal_amount = campaign.goal_amount;
        slot.updated_at = campaign.updated_at;
        Ok(())
    }

    async fn add_image(&self, image: &NewCampaignImage) -> CampaignResult<CampaignImage> {
        let mut state = self.lock();
        state.next_image_id += 1;
        let id = CampaignImageId::from_raw(state.next_image_id);

        let campaign = state
            .campaigns
            .iter_mut()
            .find(|c| c.id == image.campaign_id)
            .ok_or(CampaignError::NotFound)?;

        let now = Utc::now();
        if image.is_primary {
            for existing in campaign.images.iter_mut().filter(|i| i.is_primary) {
                existing.is_primary = false;
                existing.updated_at = now;
            }
        }

        let stored = CampaignImage {
            id,
            campaign_id: image.campaign_id,
            file_name: image.file_name.clone(),
            is_primary: image.is_primary,
            created_at: now,
            updated_at: now,
        };
        campaign.images.push(stored.clone());

        Ok(stored)
    }
}
