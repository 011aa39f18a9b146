use async_trait::async_trait;
use bank_auth::{Session, SessionStore, StoreError};
use bank_core::types::SessionId;

use crate::repositories::SessionRepo;
use crate::{DbError, DbPool};

/// [`SessionStore`] backed by the `sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: SessionId) -> DbError {
    DbError::NotFound {
        entity: "session",
        key: id.to_string(),
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, session: &Session) -> Result<(), StoreError> {
        SessionRepo::create(&self.pool, session)
            .await
            .map_err(|e| DbError::from_write(e, "session").into())
    }

    async fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        let row = SessionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| not_found(id))?;
        Ok(row.into())
    }

    async fn block(&self, id: SessionId) -> Result<(), StoreError> {
        let found = SessionRepo::block(&self.pool, id)
            .await
            .map_err(DbError::from)?;
        if !found {
            return Err(not_found(id).into());
        }
        tracing::info!(session_id = %id, "Session blocked");
        Ok(())
    }
}
