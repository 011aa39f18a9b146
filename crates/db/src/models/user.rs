//! User entity model and DTOs.

use bank_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    pub is_email_verified: bool,
    pub password_changed_at: Timestamp,
    pub created_at: Timestamp,
}

/// Safe user representation for responses (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_changed_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            password_changed_at: user.password_changed_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}

/// DTO for updating a user. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    /// Set together with `hashed_password`.
    pub password_changed_at: Option<Timestamp>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.hashed_password.is_none()
    }
}
