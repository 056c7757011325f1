pub mod campaign_details;
pub mod slug;
