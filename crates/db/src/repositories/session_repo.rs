//! Repository for the `sessions` table.

use bank_auth::Session;
use bank_core::types::SessionId;
use sqlx::PgPool;

use crate::models::session::SessionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, refresh_token, user_agent, client_ip, is_blocked, \
                        expires_at, created_at";

/// Session persistence: insert once, read by id, block.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session in a single statement.
    pub async fn create(pool: &PgPool, session: &Session) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sessions
                (id, username, refresh_token, user_agent, client_ip, is_blocked, expires_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(session.id)
        .bind(&session.subject)
        .bind(&session.refresh_token)
        .bind(&session.client.user_agent)
        .bind(&session.client.client_ip)
        .bind(session.is_blocked)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a session by id regardless of its blocked or expired state.
    pub async fn find_by_id(pool: &PgPool, id: SessionId) -> Result<Option<SessionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        sqlx::query_as::<_, SessionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a session blocked. Returns `true` if the session exists.
    ///
    /// Blocking an already-blocked session is a no-op that still reports
    /// `true`; the flag is never cleared.
    pub async fn block(pool: &PgPool, id: SessionId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET is_blocked = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
