//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCampaignRepository;
pub use postgres::PgCampaignRepository;
