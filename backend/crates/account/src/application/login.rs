//! Login Use Case

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::application::register::AuthOutput;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<AuthOutput> {
        let email = Email::parse(input.email).map_err(AccountError::invalid)?;
        if input.password.is_empty() {
            return Err(AccountError::invalid("password is required"));
        }

        // Unknown email and wrong password are indistinguishable to the caller
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.config.tokens.issue(user.id.get())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthOutput { user, token })
    }
}
