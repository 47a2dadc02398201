use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 digest, never sent to clients
    pub role: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Failure modes of the user store. `NotFound` and `Duplicate` are tagged
/// variants so callers never have to match on message text.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("user not found")]
    NotFound,
    #[error("user with this email already exists")]
    Duplicate,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence capability consumed by [`IdentityService`].
///
/// [`IdentityService`]: crate::auth::services::IdentityService
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, DirectoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<User, DirectoryError>;
    async fn get_by_email(&self, email: &str) -> Result<User, DirectoryError>;
}

/// Postgres-backed user directory.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn create_user(&self, user: User) -> Result<User, DirectoryError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DirectoryError::Duplicate,
            _ => DirectoryError::Backend(e.into()),
        })?;
        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, DirectoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Backend(e.into()))?;
        user.ok_or(DirectoryError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DirectoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DirectoryError::Backend(e.into()))?;
        user.ok_or(DirectoryError::NotFound)
    }
}
