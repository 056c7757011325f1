//! In-Memory Repository Implementation
//!
//! Backs the test suites of this crate and of the crates layered on it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Synchronous lookup for assertions
    pub fn find(&self, id: UserId) -> Option<User> {
        self.lock().iter().find(|u| u.id == id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        // A poisoned lock only means another test thread panicked
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AccountResult<User> {
        let mut users = self.lock();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AccountError::EmailTaken);
        }

        let now = Utc::now();
        let stored = User {
            id: UserId::from_raw(users.len() as i64 + 1),
            name: user.profile.name().to_string(),
            occupation: user.profile.occupation().to_string(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            avatar_file_name: None,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> AccountResult<Option<User>> {
        Ok(self.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        Ok(self.lock().iter().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        Ok(self.lock().iter().any(|u| &u.email == email))
    }

    async fn list(&self) -> AccountResult<Vec<User>> {
        let mut users = self.lock().clone();
        users.reverse();
        Ok(users)
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        let mut users = self.lock();
        if users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(AccountError::EmailTaken);
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AccountError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }

    async fn update_avatar(&self, id: UserId, path: &str) -> AccountResult<()> {
        let mut users = self.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AccountError::UserNotFound)?;
        user.avatar_file_name = Some(path.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }
}
