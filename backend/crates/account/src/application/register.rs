//! Register Use Case
//!
//! Creates a regular user account and issues a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, profile::Profile, user_role::UserRole};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub password: String,
}

/// Authenticated user plus a fresh bearer token
pub struct AuthOutput {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for AuthOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthOutput")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Validated registration fields
pub(crate) struct ValidatedSignup {
    pub profile: Profile,
    pub email: Email,
    pub password: ClearTextPassword,
}

/// Validate every field, collecting all messages before failing
pub(crate) fn validate_signup(
    name: &str,
    occupation: &str,
    email: &str,
    password: String,
) -> AccountResult<ValidatedSignup> {
    let mut errors = Vec::new();

    let profile = Profile::new(name, occupation)
        .map_err(|e| errors.extend(e))
        .ok();
    let email = Email::parse(email)
        .map_err(|e| errors.push(e.to_string()))
        .ok();
    let password = ClearTextPassword::new(password)
        .map_err(|e| errors.push(e.to_string()))
        .ok();

    match (profile, email, password) {
        (Some(profile), Some(email), Some(password)) => Ok(ValidatedSignup {
            profile,
            email,
            password,
        }),
        _ => Err(AccountError::Validation(errors)),
    }
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<AuthOutput> {
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
                role: UserRole::User,
            })
            .await?;

        let token = self.config.tokens.issue(user.id.get())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthOutput { user, token })
    }
}
