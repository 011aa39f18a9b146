use bank_auth::StoreError;
use bank_core::error::CoreError;

/// Repository-level failure, classified for the layers above.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),
}

impl DbError {
    /// Classify a write error, turning unique violations into
    /// [`DbError::AlreadyExists`] for `what`.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::AlreadyExists(what.to_string())
            }
            _ => Self::Query(err),
        }
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, key } => CoreError::not_found(entity, key),
            DbError::AlreadyExists(what) => CoreError::Conflict(format!("{what} already exists")),
            DbError::Query(e) => CoreError::Internal(e.to_string()),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}
