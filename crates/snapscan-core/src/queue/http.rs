//! libcurl-backed [`TaskQueue`].

use serde::de::DeserializeOwned;
use url::Url;

use super::types::{ArtifactsPage, ErrorBody, StatusResponse, TaskGroupPage};
use super::{Artifact, GraphTask, TaskQueue, TaskStatus};
use crate::config::HttpConfig;
use crate::error::QueueError;
use crate::retry::{run_with_retry, RetryPolicy};

const USER_AGENT: &str = concat!("snapscan/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the Taskcluster queue v1 API.
#[derive(Debug, Clone)]
pub struct HttpQueue {
    root: String,
    http: HttpConfig,
    retry: RetryPolicy,
}

impl HttpQueue {
    /// `root_url` is the API root including the version, e.g. `https://queue.taskcluster.net/v1`.
    pub fn new(root_url: &str, http: HttpConfig, retry: RetryPolicy) -> Result<Self, QueueError> {
        // Validate once so later per-request joins cannot fail on the root.
        Url::parse(root_url)?;
        Ok(Self {
            root: root_url.trim_end_matches('/').to_string(),
            http,
            retry,
        })
    }

    pub fn root_url(&self) -> &str {
        &self.root
    }

    fn endpoint(&self, path: &str, continuation: Option<&str>) -> Result<Url, QueueError> {
        let mut url = Url::parse(&format!("{}/{}", self.root, path))?;
        if let Some(token) = continuation {
            url.query_pairs_mut().append_pair("continuationToken", token);
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, QueueError> {
        let body = run_with_retry(&self.retry, || self.get_once(url.as_str()))?;
        serde_json::from_slice(&body).map_err(|source| QueueError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// One GET; returns the body of a 2xx answer.
    fn get_once(&self, url: &str) -> Result<Vec<u8>, QueueError> {
        let transport = |source: curl::Error| QueueError::Transport {
            url: url.to_string(),
            source,
        };
        tracing::debug!(url, "queue GET");

        let mut body: Vec<u8> = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.get(true).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.connect_timeout(self.http.connect_timeout())
            .map_err(transport)?;
        easy.timeout(self.http.timeout()).map_err(transport)?;
        easy.useragent(USER_AGENT).map_err(transport)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json").map_err(transport)?;
        easy.http_headers(list).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let status = easy.response_code().map_err(transport)?;
        if !(200..300).contains(&status) {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.lines().next().map(str::to_string));
            return Err(QueueError::Http {
                url: url.to_string(),
                status,
                message,
            });
        }
        Ok(body)
    }
}

impl TaskQueue for HttpQueue {
    fn status(&self, task_id: &str) -> Result<TaskStatus, QueueError> {
        let url = self.endpoint(&format!("task/{task_id}/status"), None)?;
        let resp: StatusResponse = self.get_json(&url)?;
        Ok(resp.status)
    }

    fn list_latest_artifacts(&self, task_id: &str) -> Result<Vec<Artifact>, QueueError> {
        let mut artifacts = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let url = self.endpoint(&format!("task/{task_id}/artifacts"), token.as_deref())?;
            let page: ArtifactsPage = self.get_json(&url)?;
            artifacts.extend(page.artifacts);
            match page.continuation_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        Ok(artifacts)
    }

    fn list_task_group(&self, task_group_id: &str) -> Result<Vec<GraphTask>, QueueError> {
        let mut tasks = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let url = self.endpoint(&format!("task-group/{task_group_id}/list"), token.as_deref())?;
            let page: TaskGroupPage = self.get_json(&url)?;
            tasks.extend(page.tasks.into_iter().map(GraphTask::from));
            match page.continuation_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        tracing::debug!(task_group_id, count = tasks.len(), "listed task group");
        Ok(tasks)
    }
}
