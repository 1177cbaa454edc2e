//! `snapscan run` – scan release files and print the URL report.

use anyhow::{Context, Result};
use snapscan_core::audit::Auditor;
use snapscan_core::config::AuditConfig;
use snapscan_core::known::KnownBuilds;
use snapscan_core::queue::HttpQueue;
use snapscan_core::retry::RetryPolicy;
use snapscan_core::urls::UrlTemplates;
use std::io::{self, Write};
use std::path::Path;

pub fn run_audit(
    cfg: &AuditConfig,
    releases_dir: Option<&Path>,
    marker: Option<&str>,
) -> Result<()> {
    let dir = releases_dir.unwrap_or(&cfg.releases_dir);
    let marker = marker.unwrap_or(&cfg.filename_marker);

    let retry = cfg
        .retry
        .as_ref()
        .map(RetryPolicy::from)
        .unwrap_or_default();
    let queue = HttpQueue::new(
        &cfg.queue_root_url,
        cfg.http.clone().unwrap_or_default(),
        retry,
    )
    .context("configure queue client")?;
    let templates = UrlTemplates::new(&cfg.queue_root_url, &cfg.archive_root_url)
        .context("configure URL templates")?;
    let known = KnownBuilds::with_extra(&cfg.extra_known_builds);

    tracing::info!(
        dir = %dir.display(),
        marker,
        queue = queue.root_url(),
        known = known.len(),
        "starting audit"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = Auditor::new(&queue, &known, &templates).run(dir, marker, &mut out)?;
    out.flush()?;

    tracing::info!(
        files = summary.files,
        builds = summary.builds,
        skipped_known = summary.skipped_known,
        skipped_missing = summary.skipped_missing,
        skipped_incomplete = summary.skipped_incomplete,
        artifacts = summary.artifacts,
        "audit completed"
    );
    Ok(())
}
