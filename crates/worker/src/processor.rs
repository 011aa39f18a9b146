//! Consuming side of the task queue.

use std::sync::Arc;

use bank_db::{DbError, UserStore};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::distributor::TaskQueues;
use crate::task::{PayloadSendVerifyEmail, Task, TASK_SEND_VERIFY_EMAIL};
use crate::TaskError;

/// Drains [`TaskQueues`], critical lane first, and runs each task on its own
/// tokio task.
#[derive(Clone)]
pub struct TaskProcessor {
    users: Arc<dyn UserStore>,
}

impl TaskProcessor {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Run until `cancel` fires, then wait for in-flight tasks.
    ///
    /// Tasks still waiting out their `process_in` delay at shutdown are
    /// dropped.
    pub async fn run(&self, mut queues: TaskQueues, cancel: CancellationToken) {
        let tracker = TaskTracker::new();
        tracing::info!("Task processor started");

        loop {
            let task = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Task processor shutting down");
                    break;
                }
                Some(task) = queues.critical.recv() => task,
                Some(task) = queues.default.recv() => task,
            };

            let processor = self.clone();
            let cancel = cancel.clone();
            tracker.spawn(async move {
                if let Some(delay) = task.options.process_in {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            tracing::warn!(task = %task.kind, "Dropped delayed task on shutdown");
                            return;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                if let Err(e) = processor.process(&task).await {
                    tracing::error!(
                        task = %task.kind,
                        queue = task.options.queue.as_str(),
                        error = %e,
                        "Task failed"
                    );
                }
            });
        }

        tracker.close();
        tracker.wait().await;
    }

    /// Handle one task immediately, ignoring its delay.
    pub async fn process(&self, task: &Task) -> Result<(), TaskError> {
        match task.kind.as_str() {
            TASK_SEND_VERIFY_EMAIL => self.send_verify_email(task.decode()?).await,
            other => Err(TaskError::UnknownTask(other.to_string())),
        }
    }

    async fn send_verify_email(&self, payload: PayloadSendVerifyEmail) -> Result<(), TaskError> {
        let user = match self.users.get_user(&payload.username).await {
            Ok(user) => user,
            Err(DbError::NotFound { .. }) => return Err(TaskError::UserNotFound(payload.username)),
            Err(e) => return Err(e.into()),
        };

        // Mail delivery is an external collaborator; record the hand-off.
        tracing::info!(
            task = TASK_SEND_VERIFY_EMAIL,
            username = %user.username,
            email = %user.email,
            "Processed task: verify email sent"
        );
        Ok(())
    }
}
