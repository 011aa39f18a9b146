//! Task envelopes and payloads.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::TaskError;

pub const TASK_SEND_VERIFY_EMAIL: &str = "task:send_verify_email";

/// Priority lane a task is enqueued on. Critical tasks are always drained
/// before default ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Queue {
    Critical,
    #[default]
    Default,
}

impl Queue {
    pub fn as_str(self) -> &'static str {
        match self {
            Queue::Critical => "critical",
            Queue::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    pub queue: Queue,
    /// Hold the task at least this long before processing it.
    pub process_in: Option<Duration>,
}

impl TaskOptions {
    pub fn critical() -> Self {
        Self {
            queue: Queue::Critical,
            ..Self::default()
        }
    }

    pub fn process_in(mut self, delay: Duration) -> Self {
        self.process_in = Some(delay);
        self
    }
}

/// A named task with a JSON payload.
#[derive(Debug, Clone)]
pub struct Task {
    pub kind: String,
    pub payload: Vec<u8>,
    pub options: TaskOptions,
}

impl Task {
    pub fn new<P: Serialize>(kind: &str, payload: &P, options: TaskOptions) -> Result<Self, TaskError> {
        Ok(Self {
            kind: kind.to_string(),
            payload: serde_json::to_vec(payload).map_err(TaskError::Encode)?,
            options,
        })
    }

    pub fn decode<P: for<'de> Deserialize<'de>>(&self) -> Result<P, TaskError> {
        serde_json::from_slice(&self.payload).map_err(|source| TaskError::Decode {
            task: self.kind.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSendVerifyEmail {
    pub username: String,
}
