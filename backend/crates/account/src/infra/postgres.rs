//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AccountError, AccountResult};

const USER_COLUMNS: &str = r#"
    id,
    name,
    occupation,
    email,
    password_hash,
    avatar_file_name,
    role,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violation on `users.email`
fn map_unique_email(err: sqlx::Error) -> AccountError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        AccountError::EmailTaken
    } else {
        AccountError::Database(err)
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AccountResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, occupation, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.profile.name())
        .bind(user.profile.occupation())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self) -> AccountResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                occupation = $3,
                email = $4,
                role = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.get())
        .bind(&user.name)
        .bind(&user.occupation)
        .bind(user.email.as_str())
        .bind(user.role.code())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_email)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound);
        }

        Ok(())
    }

    async fn update_avatar(&self, id: UserId, path: &str) -> AccountResult<()> {
        let result = sqlx::query(
            "UPDATE users SET avatar_file_name = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.get())
        .bind(path)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    occupation: String,
    email: String,
    password_hash: String,
    avatar_file_name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AccountError::Internal(format!("Invalid role in database: {}", self.role)))?;

        Ok(User {
            id: UserId::from_raw(self.id),
            name: self.name,
            occupation: self.occupation,
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_phc_string(self.password_hash)?,
            avatar_file_name: self.avatar_file_name,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
