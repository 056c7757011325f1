pub mod campaign;
pub mod campaign_image;
