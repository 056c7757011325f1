//! Presentation Layer

pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use handlers::AdminAppState;
pub use router::{admin_router, admin_router_generic};
