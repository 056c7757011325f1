//! Bootstrap Admin Use Case
//!
//! Ensures an admin account exists so the panel can be reached on a fresh
//! database.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, profile::Profile, user_role::UserRole};
use crate::error::{AccountError, AccountResult};

pub struct BootstrapAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> BootstrapAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Create the admin unless the email is already registered.
    /// Returns the created user, or `None` when nothing was done.
    pub async fn execute(&self, email: &str, password: String) -> AccountResult<Option<User>> {
        let email = Email::new(email)?;

        if self.user_repo.exists_by_email(&email).await? {
            tracing::debug!(email = %email, "Admin bootstrap skipped, email already registered");
            return Ok(None);
        }

        let password =
            ClearTextPassword::new(password).map_err(|e| AccountError::invalid(e.to_string()))?;
        let profile = Profile::new("Administrator", "Administrator")
            .map_err(AccountError::Validation)?;

        let user = self
            .user_repo
            .create(&NewUser {
                profile,
                email,
                password_hash: password.hash(self.config.pepper())?,
                role: UserRole::Admin,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Admin account bootstrapped");

        Ok(Some(user))
    }
}
