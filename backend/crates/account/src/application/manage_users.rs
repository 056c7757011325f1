//! User Management Use Case
//!
//! Admin panel operations over every account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::application::register::validate_signup;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, profile::Profile, user_role::UserRole};
use crate::error::{AccountError, AccountResult};

/// Create user input (admin form)
pub struct CreateUserInput {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Update user input (admin form). Passwords are not editable here.
pub struct UpdateUserInput {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub role: UserRole,
}

pub struct ManageUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> ManageUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn list(&self) -> AccountResult<Vec<User>> {
        self.user_repo.list().await
    }

    pub async fn get(&self, id: UserId) -> AccountResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    pub async fn create(&self, input: CreateUserInput) -> AccountResult<User> {
        let signup = validate_signup(&input.name, &input.occupation, &input.email, input.password)?;

        if self.user_repo.exists_by_email(&signup.email).await? {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = signup.password.hash(self.config.pepper())?;

        let user = self
            .user_repo
            .create(&NewUser {
                profile: signup.profile,
                email: signup.email,
                password_hash,
                role: input.role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created by admin");

        Ok(user)
    }

    pub async fn update(&self, id: UserId, input: UpdateUserInput) -> AccountResult<User> {
        let mut errors = Vec::new();
        let profile = Profile::new(&input.name, &input.occupation)
            .map_err(|e| errors.extend(e))
            .ok();
        let email = Email::parse(input.email)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let (Some(profile), Some(email)) = (profile, email) else {
            return Err(AccountError::Validation(errors));
        };

        let mut user = self.get(id).await?;

        if user.email != email && self.user_repo.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken);
        }

        user.apply_edit(profile, email, input.role);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "User updated by admin");

        Ok(user)
    }
}
