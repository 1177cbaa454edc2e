//! Integration test: the curl-backed queue client and a full audit run
//! against a local server that answers like the Taskcluster queue.

mod common;

use std::time::Duration;

use common::queue_server::{QueueServer, Response};
use snapscan_core::audit::{Auditor, RunSummary};
use snapscan_core::config::HttpConfig;
use snapscan_core::error::{AuditError, QueueError};
use snapscan_core::known::KnownBuilds;
use snapscan_core::queue::{HttpQueue, TaskQueue, TaskState};
use snapscan_core::retry::RetryPolicy;
use snapscan_core::urls::UrlTemplates;
use tempfile::tempdir;

const STATUS_COMPLETED: &str = r#"{"status": {"taskId": "promote1", "state": "completed",
    "runs": [{"runId": 0, "state": "completed", "resolved": "2018-05-09T10:00:00.000Z"}]}}"#;

const GROUP_PAGE_1: &str = r#"{"taskGroupId": "promote1", "continuationToken": "page2", "tasks": [
    {"status": {"taskId": "notify1", "state": "completed", "runs": []},
     "task": {"metadata": {"name": "release-notify-promote-firefox"}}}
]}"#;

const GROUP_PAGE_2: &str = r#"{"taskGroupId": "promote1", "tasks": [
    {"status": {"taskId": "snap1", "state": "completed",
                "runs": [{"state": "completed", "resolved": "2018-05-09T11:00:00.000Z"}]},
     "task": {"metadata": {"name": "release-snap-push-firefox"}}},
    {"status": {"taskId": "snapOld", "state": "failed", "runs": []},
     "task": {"metadata": {"name": "release-snap-push-firefox"}}}
]}"#;

const ARTIFACTS: &str = r#"{"artifacts": [
    {"storageType": "s3", "name": "public/build/firefox-60.0.snap", "contentType": "application/octet-stream"},
    {"storageType": "s3", "name": "public/build/firefox-60.0.snap.checksums", "contentType": "text/plain"},
    {"storageType": "s3", "name": "public/logs/live_backing.log", "contentType": "text/plain"}
]}"#;

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(10),
    }
}

fn client(server: &QueueServer) -> HttpQueue {
    HttpQueue::new(&server.root, HttpConfig::default(), fast_retry()).unwrap()
}

fn promote_routes() -> Vec<(&'static str, Vec<Response>)> {
    vec![
        ("task/promote1/status", vec![Response::ok(STATUS_COMPLETED)]),
        ("task-group/promote1/list", vec![Response::ok(GROUP_PAGE_1)]),
        (
            "task-group/promote1/list?continuationToken=page2",
            vec![Response::ok(GROUP_PAGE_2)],
        ),
        ("task/snap1/artifacts", vec![Response::ok(ARTIFACTS)]),
    ]
}

#[test]
fn status_is_parsed() {
    let server = QueueServer::start(promote_routes());
    let status = client(&server).status("promote1").unwrap();
    assert_eq!(status.task_id, "promote1");
    assert_eq!(status.state, TaskState::Completed);
    assert_eq!(status.resolved(), Some("2018-05-09T10:00:00.000Z"));
}

#[test]
fn task_group_listing_follows_continuation_token() {
    let server = QueueServer::start(promote_routes());
    let tasks = client(&server).list_task_group("promote1").unwrap();
    let ids: Vec<&str> = tasks.iter().map(|t| t.task_id.as_str()).collect();
    assert_eq!(ids, vec!["notify1", "snap1", "snapOld"]);
    assert_eq!(
        server.requests(),
        vec![
            "task-group/promote1/list",
            "task-group/promote1/list?continuationToken=page2",
        ]
    );
}

#[test]
fn missing_task_is_not_found_and_not_retried() {
    let server = QueueServer::start(Vec::new());
    let err = client(&server).status("gone").unwrap_err();
    assert!(err.is_not_found());
    match &err {
        QueueError::Http { status, message, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(message.as_deref(), Some("Resource not found"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn server_errors_are_retried() {
    let server = QueueServer::start(vec![(
        "task/snap1/artifacts",
        vec![
            Response::status(502, "upstream"),
            Response::ok(ARTIFACTS),
        ],
    )]);
    let artifacts = client(&server).list_latest_artifacts("snap1").unwrap();
    assert_eq!(artifacts.len(), 3);
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn persistent_server_error_is_returned_after_retries() {
    let server = QueueServer::start(vec![(
        "task/promote1/status",
        vec![Response::status(500, r#"{"message": "boom"}"#)],
    )]);
    let err = client(&server).status("promote1").unwrap_err();
    assert!(matches!(err, QueueError::Http { status: 500, .. }));
    assert_eq!(server.requests().len(), 3);
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let server = QueueServer::start(vec![(
        "task/promote1/status",
        vec![Response::ok("<html>not json</html>")],
    )]);
    let err = client(&server).status("promote1").unwrap_err();
    assert!(matches!(err, QueueError::Decode { .. }));
}

#[test]
fn full_run_prints_archive_and_queue_urls() {
    let server = QueueServer::start(promote_routes());
    let queue = client(&server);

    let releases = tempdir().unwrap();
    std::fs::write(
        releases.path().join("firefox-59.0-60.0.json"),
        r#"{"version": "60.0", "inflight": [
            {"buildnum": 2, "graphids": [["promote_rc", "promote1"], ["ship_rc", "ship1"]]},
            {"buildnum": 3, "graphids": [["promote_rc", "missing"]]}
        ]}"#,
    )
    .unwrap();

    let known = KnownBuilds::empty();
    let templates =
        UrlTemplates::new(&server.root, "https://archive.mozilla.org/pub/firefox/candidates")
            .unwrap();
    let mut out = Vec::new();
    let summary = Auditor::new(&queue, &known, &templates)
        .run(releases.path(), "-59", &mut out)
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    let expected = format!(
        "https://archive.mozilla.org/pub/firefox/candidates/60.0-candidates/build2/snap/firefox-60.0.snap \
{root}/task/snap1/artifacts/public/build/firefox-60.0.snap\n\
https://archive.mozilla.org/pub/firefox/candidates/60.0-candidates/build2/snap/firefox-60.0.snap.checksums \
{root}/task/snap1/artifacts/public/build/firefox-60.0.snap.checksums\n\
Skipping 60.0 build 3 because promote task does not exist anymore\n",
        root = server.root
    );
    assert_eq!(out, expected);
    assert_eq!(
        summary,
        RunSummary {
            files: 1,
            builds: 2,
            skipped_known: 0,
            skipped_missing: 1,
            skipped_incomplete: 0,
            artifacts: 2,
        }
    );
}

#[test]
fn missing_release_directory_is_fatal() {
    let server = QueueServer::start(Vec::new());
    let queue = client(&server);
    let known = KnownBuilds::default();
    let templates = UrlTemplates::new(&server.root, "https://archive.example/c").unwrap();
    let dir = tempdir().unwrap();
    let err = Auditor::new(&queue, &known, &templates)
        .run(&dir.path().join("absent"), "-59", &mut std::io::sink())
        .unwrap_err();
    assert!(matches!(err, AuditError::ReadDir { .. }));
    assert!(server.requests().is_empty());
}
