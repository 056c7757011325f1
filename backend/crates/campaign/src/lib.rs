//! Campaign Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Campaign and image entities, slug, repository trait
//! - `application/` - Use cases (listing, detail, create, update, image upload)
//! - `infra/` - Database and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs (formatters), router
//!
//! Writes require a bearer principal and are restricted to the campaign
//! owner. The admin panel acts through [`Actor::Admin`], which bypasses the
//! ownership check.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::CampaignConfig;
pub use domain::actor::Actor;
pub use domain::entity::{campaign::Campaign, campaign_image::CampaignImage};
pub use domain::repository::CampaignRepository;
pub use error::{CampaignError, CampaignResult};
pub use infra::memory::InMemoryCampaignRepository;
pub use infra::postgres::PgCampaignRepository;
pub use presentation::router::{campaign_router, campaign_router_generic};
