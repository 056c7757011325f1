//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Bearer tokens (JWT) for the JSON API
//! - Avatar upload
//! - Role-based access (User, Admin) and user management for the admin panel

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountConfig;
pub use domain::entity::user::User;
pub use domain::repository::UserRepository;
pub use domain::value_object::{email::Email, user_role::UserRole};
pub use error::{AccountError, AccountResult};
pub use infra::memory::InMemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{BearerState, Principal, require_bearer};
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
