//! Save Avatar Use Case
//!
//! Stores the uploaded file as `images/{user_id}-{file name}` and records the
//! path on the user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

pub struct SaveAvatarUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> SaveAvatarUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Returns the stored path
    pub async fn execute(
        &self,
        user_id: UserId,
        file_name: &str,
        bytes: &[u8],
    ) -> AccountResult<String> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountError::UserNotFound);
        }

        let staged = self
            .config
            .uploads
            .stage(user_id.get(), file_name, bytes)
            .await?;

        if let Err(e) = self.user_repo.update_avatar(user_id, staged.path()).await {
            staged.discard().await;
            return Err(e);
        }
        let path = staged.commit().await?;

        tracing::info!(user_id = %user_id, path = %path, "Avatar saved");

        Ok(path)
    }
}
