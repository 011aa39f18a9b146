/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Sessions are keyed by the id of the refresh credential issued at login.
pub type SessionId = uuid::Uuid;
