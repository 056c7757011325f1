//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CampaignAppState;
pub use router::{campaign_router, campaign_router_generic};
