//! Locating the snap task inside a promote graph.

use crate::error::AuditError;
use crate::queue::{GraphTask, TaskQueue};

/// Substring of the task name that marks a snap packaging task.
const SNAP_TASK_MARKER: &str = "-snap-";

/// One promote graph contains two completed snap tasks. This is the one that
/// produced the published artifacts; the other is a rerun left in the group.
pub const KNOWN_DUPLICATE_SNAP_TASK_ID: &str = "QSnfB6LMS--TgiQM9nNAKw";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapTask {
    pub task_id: String,
    pub completed: bool,
    /// Resolution time of the task's last run.
    pub resolved: Option<String>,
}

impl From<&GraphTask> for SnapTask {
    fn from(task: &GraphTask) -> Self {
        SnapTask {
            task_id: task.task_id.clone(),
            completed: task.is_completed(),
            resolved: task.resolved.clone(),
        }
    }
}

/// Picks the single completed snap task among `tasks`.
pub fn select_snap_task(graph_id: &str, tasks: &[GraphTask]) -> Result<SnapTask, AuditError> {
    let candidates: Vec<&GraphTask> = tasks
        .iter()
        .filter(|t| t.name.contains(SNAP_TASK_MARKER) && t.is_completed())
        .collect();

    if let [task] = candidates.as_slice() {
        return Ok(SnapTask::from(*task));
    }
    if let Some(task) = candidates
        .iter()
        .find(|t| t.task_id == KNOWN_DUPLICATE_SNAP_TASK_ID)
    {
        tracing::debug!(graph_id, "using known snap task {}", task.task_id);
        return Ok(SnapTask::from(*task));
    }
    Err(AuditError::AmbiguousSnapTask {
        graph_id: graph_id.to_string(),
        candidates: candidates.iter().map(|t| t.task_id.clone()).collect(),
    })
}

/// Loads the task group of `graph_id` and picks its snap task.
pub fn find_snap_task<Q: TaskQueue + ?Sized>(
    queue: &Q,
    graph_id: &str,
) -> Result<SnapTask, AuditError> {
    let tasks = queue.list_task_group(graph_id)?;
    select_snap_task(graph_id, &tasks)
}
