//! Check Email Availability Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AccountResult;

pub struct CheckEmailUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CheckEmailUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// `true` when no account uses `email`
    pub async fn execute(&self, email: &str) -> AccountResult<bool> {
        let email = Email::new(email)?;
        Ok(!self.user_repo.exists_by_email(&email).await?)
    }
}
