#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Task queue is closed")]
    QueueClosed,

    #[error("Failed to encode task payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed payload for task {task}: {source}")]
    Decode {
        task: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown task type: {0}")]
    UnknownTask(String),

    #[error("User {0} does not exist")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] bank_db::DbError),
}
