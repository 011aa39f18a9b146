//! Side-effecting background tasks.
//!
//! Request handlers enqueue through a [`TaskDistributor`]; a single
//! [`TaskProcessor`] drains the queues until cancelled. Delivery is
//! in-process and at-most-once: a task that fails is logged and dropped.

pub mod distributor;
pub mod error;
pub mod processor;
pub mod task;

pub use distributor::{ChannelTaskDistributor, TaskDistributor, TaskQueues};
pub use error::TaskError;
pub use processor::TaskProcessor;
pub use task::{PayloadSendVerifyEmail, Queue, Task, TaskOptions};
