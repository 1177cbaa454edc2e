//! Queue API payloads (only the fields the audit reads).

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Unscheduled,
    Pending,
    Running,
    Completed,
    Failed,
    Exception,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunStatus {
    pub state: TaskState,
    #[serde(default)]
    pub resolved: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub task_id: String,
    pub state: TaskState,
    #[serde(default)]
    pub runs: Vec<RunStatus>,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }

    /// Resolution time of the last run, if it has one.
    pub fn resolved(&self) -> Option<&str> {
        self.runs.last().and_then(|r| r.resolved.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artifact {
    pub name: String,
}

/// One member of a task group, flattened from the `list` payload.
#[derive(Debug, Clone)]
pub struct GraphTask {
    pub task_id: String,
    pub name: String,
    pub state: TaskState,
    pub resolved: Option<String>,
}

impl GraphTask {
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArtifactsPage {
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskGroupPage {
    pub tasks: Vec<TaskGroupEntry>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskGroupEntry {
    pub status: TaskStatus,
    pub task: TaskDefinition,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskDefinition {
    pub metadata: TaskMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskMetadata {
    pub name: String,
}

impl From<TaskGroupEntry> for GraphTask {
    fn from(entry: TaskGroupEntry) -> Self {
        let resolved = entry.status.resolved().map(str::to_string);
        GraphTask {
            task_id: entry.status.task_id,
            name: entry.task.metadata.name,
            state: entry.status.state,
            resolved,
        }
    }
}

/// Error body the queue sends with non-2xx answers.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
