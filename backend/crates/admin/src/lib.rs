//! Admin Panel Module
//!
//! Server-rendered HTML panel for managing users, campaigns and
//! transactions:
//! - `config` - Session secret, cookie attributes, session lifetime
//! - `session` - HMAC-signed session cookie values
//! - `presentation/` - Admin middleware, form handlers, views, router
//!
//! The panel reuses the use cases of `account`, `campaign` and `funding`,
//! acting on campaigns as [`campaign::Actor::Admin`].

pub mod config;
pub mod error;
pub mod presentation;
pub mod session;


// Re-exports for convenience
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use presentation::middleware::{AdminGuard, CurrentAdmin, require_admin};
pub use presentation::router::{admin_router, admin_router_generic};
