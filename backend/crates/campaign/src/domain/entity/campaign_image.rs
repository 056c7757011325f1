//! Campaign Image Entity

use chrono::{DateTime, Utc};
use kernel::id::{CampaignId, CampaignImageId};

#[derive(Debug, Clone)]
pub struct CampaignImage {
    pub id: CampaignImageId,
    pub campaign_id: CampaignId,
    /// Stored upload path, e.g. `images/3-cover.png`
    pub file_name: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image about to be attached to a campaign
#[derive(Debug, Clone)]
pub struct NewCampaignImage {
    pub campaign_id: CampaignId,
    pub file_name: String,
    pub is_primary: bool,
}
