//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::FundingAppState;
pub use router::{funding_router, funding_router_generic};
