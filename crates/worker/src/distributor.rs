//! Enqueueing side of the task queue.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::task::{PayloadSendVerifyEmail, Queue, Task, TaskOptions, TASK_SEND_VERIFY_EMAIL};
use crate::TaskError;

/// Enqueues tasks for asynchronous processing.
#[async_trait]
pub trait TaskDistributor: Send + Sync {
    async fn distribute_send_verify_email(
        &self,
        payload: &PayloadSendVerifyEmail,
        options: TaskOptions,
    ) -> Result<(), TaskError>;
}

/// Receiving halves of the two priority lanes, consumed by a
/// [`TaskProcessor`](crate::TaskProcessor).
#[derive(Debug)]
pub struct TaskQueues {
    pub critical: mpsc::Receiver<Task>,
    pub default: mpsc::Receiver<Task>,
}

/// In-process distributor over bounded tokio channels.
#[derive(Debug, Clone)]
pub struct ChannelTaskDistributor {
    critical: mpsc::Sender<Task>,
    default: mpsc::Sender<Task>,
}

impl ChannelTaskDistributor {
    /// Create a distributor and the queues it feeds, each holding up to
    /// `capacity` pending tasks.
    pub fn channel(capacity: usize) -> (Self, TaskQueues) {
        let (critical_tx, critical_rx) = mpsc::channel(capacity);
        let (default_tx, default_rx) = mpsc::channel(capacity);
        (
            Self {
                critical: critical_tx,
                default: default_tx,
            },
            TaskQueues {
                critical: critical_rx,
                default: default_rx,
            },
        )
    }

    async fn enqueue(&self, task: Task) -> Result<(), TaskError> {
        let lane = match task.options.queue {
            Queue::Critical => &self.critical,
            Queue::Default => &self.default,
        };
        let (kind, queue) = (task.kind.clone(), task.options.queue);
        lane.send(task).await.map_err(|_| TaskError::QueueClosed)?;
        tracing::info!(task = %kind, queue = queue.as_str(), "Enqueued task");
        Ok(())
    }
}

#[async_trait]
impl TaskDistributor for ChannelTaskDistributor {
    async fn distribute_send_verify_email(
        &self,
        payload: &PayloadSendVerifyEmail,
        options: TaskOptions,
    ) -> Result<(), TaskError> {
        let task = Task::new(TASK_SEND_VERIFY_EMAIL, payload, options)?;
        self.enqueue(task).await
    }
}
