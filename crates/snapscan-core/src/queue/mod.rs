//! Taskcluster queue access.
//!
//! The pipeline only depends on the [`TaskQueue`] trait; [`HttpQueue`] is the
//! libcurl-backed implementation used by the CLI.

mod http;
mod types;

pub use http::HttpQueue;
pub use types::{Artifact, GraphTask, RunStatus, TaskState, TaskStatus};

use crate::error::QueueError;

/// The queue calls the audit needs.
pub trait TaskQueue {
    /// Status of a single task (`GET /task/<id>/status`).
    fn status(&self, task_id: &str) -> Result<TaskStatus, QueueError>;

    /// Artifacts of the latest run of a task, all pages.
    fn list_latest_artifacts(&self, task_id: &str) -> Result<Vec<Artifact>, QueueError>;

    /// Every task in a task group (graph), all pages.
    fn list_task_group(&self, task_group_id: &str) -> Result<Vec<GraphTask>, QueueError>;
}
