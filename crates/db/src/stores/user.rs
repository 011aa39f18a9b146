use async_trait::async_trait;

use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::UserRepo;
use crate::{DbError, DbPool};

/// User persistence used by the API handlers and the task processor.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; a taken username or email is [`DbError::AlreadyExists`].
    async fn create_user(&self, input: &CreateUser) -> Result<User, DbError>;

    async fn get_user(&self, username: &str) -> Result<User, DbError>;

    /// Apply the `Some` fields of `input`.
    async fn update_user(&self, username: &str, input: &UpdateUser) -> Result<User, DbError>;
}

/// [`UserStore`] backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn not_found(username: &str) -> DbError {
    DbError::NotFound {
        entity: "user",
        key: username.to_string(),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, DbError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|e| DbError::from_write(e, &format!("user {}", input.username)))
    }

    async fn get_user(&self, username: &str) -> Result<User, DbError> {
        UserRepo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| not_found(username))
    }

    async fn update_user(&self, username: &str, input: &UpdateUser) -> Result<User, DbError> {
        UserRepo::update(&self.pool, username, input)
            .await
            .map_err(|e| DbError::from_write(e, "email"))?
            .ok_or_else(|| not_found(username))
    }
}
