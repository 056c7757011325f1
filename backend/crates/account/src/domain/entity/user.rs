//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, profile::Profile, user_role::UserRole};

/// Persisted user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub occupation: String,
    pub email: Email,
    pub password_hash: HashedPassword,
    /// Stored upload path, e.g. `images/3-avatar.png`
    pub avatar_file_name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Apply an admin edit
    pub fn apply_edit(&mut self, profile: Profile, email: Email, role: UserRole) {
        self.name = profile.name().to_string();
        self.occupation = profile.occupation().to_string();
        self.email = email;
        self.role = role;
        self.updated_at = Utc::now();
    }
}

/// User about to be inserted (ID and timestamps come from the database)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub profile: Profile,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
}
