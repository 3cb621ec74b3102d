// Credential store: the user persistence seam and its Postgres implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{NewUser, User},
};

/// Lookups and inserts the auth flow needs from user persistence
///
/// Implementations own concurrency control over records and must enforce
/// username uniqueness (reporting it as `UsernameAlreadyExists`).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Find a user by id
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError>;

    /// Insert a user; the store assigns id and timestamps
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;
}

const USER_COLUMNS: &str = "id, username, password_hash, nickname, avatar, role, created_at, updated_at";

/// User repository backed by Postgres
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, nickname, avatar, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.nickname)
        .bind(&user.avatar)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::UsernameAlreadyExists;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(created)
    }
}
