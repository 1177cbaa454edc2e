//! Error types for the audit pipeline and the queue client.

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the Taskcluster queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}{}", message_suffix(.message))]
    Http {
        url: String,
        status: u32,
        message: Option<String>,
    },
    /// Curl reported an error (timeout, connection, etc.).
    #[error("GET {url} failed")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Response body was not the JSON we expected.
    #[error("decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid queue URL")]
    Url(#[from] url::ParseError),
}

impl QueueError {
    /// True when the queue reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueueError::Http { status: 404, .. })
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// A configured URL root that does not parse. `field` is the config key.
#[derive(Debug, Error)]
#[error("invalid {field} {value:?}")]
pub struct RootUrlError {
    pub field: &'static str,
    pub value: String,
    #[source]
    pub source: url::ParseError,
}

/// Fatal conditions of an audit run. Recoverable ones never surface here.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("read release directory {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read release file {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse release file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("version \"{version}\" build {build_number} does not have a singular promote graph: {graph_ids}")]
    AmbiguousPromoteGraph {
        version: String,
        build_number: u32,
        graph_ids: String,
    },
    #[error("graph \"{graph_id}\" does not have a unique snap task: {candidates:?}")]
    AmbiguousSnapTask {
        graph_id: String,
        candidates: Vec<String>,
    },
    #[error("\"{task_id}\" does not have 2 snap artifacts: {names:?}")]
    ArtifactCount { task_id: String, names: Vec<String> },
    #[error("write report")]
    Output(#[source] std::io::Error),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
