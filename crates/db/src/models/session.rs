//! Session row model.

use bank_auth::{ClientContext, Session};
use bank_core::types::{SessionId, Timestamp};
use sqlx::FromRow;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: SessionId,
    pub username: String,
    pub refresh_token: String,
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
    pub is_blocked: bool,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            subject: row.username,
            refresh_token: row.refresh_token,
            client: ClientContext {
                user_agent: row.user_agent,
                client_ip: row.client_ip,
            },
            is_blocked: row.is_blocked,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}
