//! Application Layer
//!
//! Use cases for campaigns and their images.

pub mod config;
pub mod create_campaign;
pub mod get_campaign;
pub mod list_campaigns;
pub mod update_campaign;
pub mod upload_image;

pub use config::CampaignConfig;
pub use create_campaign::{CampaignInput, CreateCampaignUseCase};
pub use get_campaign::{CampaignDetailOutput, GetCampaignUseCase};
pub use list_campaigns::ListCampaignsUseCase;
pub use update_campaign::UpdateCampaignUseCase;
pub use upload_image::{UploadImageInput, UploadImageUseCase};
