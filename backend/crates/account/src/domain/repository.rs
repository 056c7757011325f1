//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::email::Email;
use crate::error::AccountResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return the stored row.
    /// A duplicate email yields `AccountError::EmailTaken`.
    async fn create(&self, user: &NewUser) -> AccountResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AccountResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Check if an email is registered
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// All users, newest first
    async fn list(&self) -> AccountResult<Vec<User>>;

    /// Persist profile, email and role changes
    async fn update(&self, user: &User) -> AccountResult<()>;

    /// Set the avatar path
    async fn update_avatar(&self, id: UserId, path: &str) -> AccountResult<()>;
}
