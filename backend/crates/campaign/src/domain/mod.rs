//! Domain Layer

pub mod actor;
pub mod entity;
pub mod repository;
pub mod value_object;

pub use actor::Actor;
pub use entity::{campaign::Campaign, campaign_image::CampaignImage};
pub use repository::CampaignRepository;
