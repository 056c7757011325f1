//! Authenticate Use Case
//!
//! Resolves a bearer token to the user it was issued for.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, token: &str) -> AccountResult<User> {
        let user_id = UserId::from_raw(self.config.tokens.validate(token)?);

        // A valid token for a user that no longer exists is still unauthenticated
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::Unauthenticated)
    }
}
