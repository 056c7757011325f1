//! Campaign Entity

use chrono::{DateTime, Utc};
use kernel::id::{CampaignId, UserId};

use crate::domain::entity::campaign_image::CampaignImage;
use crate::domain::value_object::campaign_details::CampaignDetails;

#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: CampaignId,
    pub user_id: UserId,
    pub name: String,
    pub short_description: String,
    pub description: String,
    /// Comma-separated perks as stored
    pub perks: String,
    pub backer_count: i64,
    pub goal_amount: i64,
    pub current_amount: i64,
    pub slug: String,
    pub images: Vec<CampaignImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Perks as a trimmed list, empty entries dropped
    pub fn perk_list(&self) -> Vec<String> {
        self.perks
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn primary_image(&self) -> Option<&CampaignImage> {
        self.images.iter().find(|image| image.is_primary)
    }

    /// Still accepting pledges
    pub fn is_open(&self) -> bool {
        self.current_amount < self.goal_amount
    }

    /// Replace the editable fields. Slug, owner and totals are untouched.
    pub fn apply_details(&mut self, details: CampaignDetails) {
        self.name = details.name;
        self.short_description = details.short_description;
        self.description = details.description;
        self.perks = details.perks;
        self.goal_amount = details.goal_amount;
        self.updated_at = Utc::now();
    }
}

/// Campaign about to be inserted
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub user_id: UserId,
    pub details: CampaignDetails,
    /// Completed with the new campaign ID on insert
    pub slug_base: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(perks: &str, goal: i64, current: i64) -> Campaign {
        let now = Utc::now();
        Campaign {
            id: CampaignId::from_raw(1),
            user_id: UserId::from_raw(1),
            name: "Solar Panels".into(),
            short_description: "short".into(),
            description: "long".into(),
            perks: perks.into(),
            backer_count: 0,
            goal_amount: goal,
            current_amount: current,
            slug: "solar-panels-1".into(),
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_perk_list() {
        let c = campaign(" sticker, t-shirt ,, poster", 100, 0);
        assert_eq!(c.perk_list(), vec!["sticker", "t-shirt", "poster"]);
        assert!(campaign("", 100, 0).perk_list().is_empty());
    }

    #[test]
    fn test_is_open() {
        assert!(campaign("", 100, 99).is_open());
        assert!(!campaign("", 100, 100).is_open());
        assert!(!campaign("", 100, 150).is_open());
    }
}
