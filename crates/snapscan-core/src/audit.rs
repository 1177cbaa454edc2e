//! The audit run: release files in, `destination source` URL pairs out.
//!
//! Every stage is sequential. Recoverable conditions (known build, promote
//! task gone, promote or snap task not completed) skip the build; anything
//! else stops the run with an [`AuditError`].

use std::io::Write;
use std::path::Path;

use crate::error::AuditError;
use crate::graph::{self, SnapTask};
use crate::known::KnownBuilds;
use crate::queue::TaskQueue;
use crate::release::{self, PromoteGraph, ReleaseFile};
use crate::urls::{self, UrlTemplates};

/// Substring an artifact name must contain to belong to the snap.
const SNAP_ARTIFACT_MARKER: &str = ".snap";
/// The snap itself and its checksums file.
const EXPECTED_SNAP_ARTIFACTS: usize = 2;

/// What happened to one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// In the known-build table; no queue call made.
    Known,
    /// The queue no longer has the promote task.
    PromoteMissing,
    /// Promote task exists but has not completed.
    PromoteIncomplete,
    SnapIncomplete,
    Mapped(Vec<ArtifactMapping>),
}

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMapping {
    pub destination_url: String,
    pub source_url: String,
    pub is_checksum: bool,
}

/// Counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub builds: usize,
    pub skipped_known: usize,
    pub skipped_missing: usize,
    pub skipped_incomplete: usize,
    pub artifacts: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &BuildOutcome) {
        self.builds += 1;
        match outcome {
            BuildOutcome::Known => self.skipped_known += 1,
            BuildOutcome::PromoteMissing => self.skipped_missing += 1,
            BuildOutcome::PromoteIncomplete | BuildOutcome::SnapIncomplete => {
                self.skipped_incomplete += 1
            }
            BuildOutcome::Mapped(mappings) => self.artifacts += mappings.len(),
        }
    }
}

/// Queue URLs of the two snap artifacts of `task_id`.
pub fn snap_artifact_urls<'a, Q: TaskQueue + ?Sized>(
    queue: &Q,
    templates: &'a UrlTemplates,
    task_id: &'a str,
) -> Result<impl Iterator<Item = String> + 'a, AuditError> {
    let names: Vec<String> = queue
        .list_latest_artifacts(task_id)?
        .into_iter()
        .map(|a| a.name)
        .filter(|name| name.contains(SNAP_ARTIFACT_MARKER))
        .collect();
    if names.len() != EXPECTED_SNAP_ARTIFACTS {
        return Err(AuditError::ArtifactCount {
            task_id: task_id.to_string(),
            names,
        });
    }
    Ok(names
        .into_iter()
        .map(move |name| templates.artifact_url(task_id, &name)))
}

/// Runs the pipeline against one queue.
pub struct Auditor<'a, Q: TaskQueue + ?Sized> {
    queue: &'a Q,
    known: &'a KnownBuilds,
    templates: &'a UrlTemplates,
}

impl<'a, Q: TaskQueue + ?Sized> Auditor<'a, Q> {
    pub fn new(queue: &'a Q, known: &'a KnownBuilds, templates: &'a UrlTemplates) -> Self {
        Self {
            queue,
            known,
            templates,
        }
    }

    /// Scans `dir` for release files matching `marker` and writes the report to `out`.
    pub fn run<W: Write>(
        &self,
        dir: &Path,
        marker: &str,
        out: &mut W,
    ) -> Result<RunSummary, AuditError> {
        let mut summary = RunSummary::default();
        for path in release::discover(dir, marker)? {
            tracing::debug!(path = %path.display(), "scanning release file");
            summary.files += 1;
            let release = ReleaseFile::load(&path)?;
            for graph in release.promote_graphs() {
                let outcome = self.audit_build(&graph?, out)?;
                summary.record(&outcome);
            }
        }
        Ok(summary)
    }

    /// Audits one build, writing skip notices and URL pairs to `out` as it goes.
    pub fn audit_build<W: Write>(
        &self,
        graph: &PromoteGraph,
        out: &mut W,
    ) -> Result<BuildOutcome, AuditError> {
        let PromoteGraph {
            graph_id,
            version,
            build_number,
        } = graph;

        if self.known.contains(version, *build_number) {
            tracing::info!(%version, build_number, "known build, skipping");
            writeln!(out, "Skipping {version} build {build_number}").map_err(AuditError::Output)?;
            return Ok(BuildOutcome::Known);
        }

        match self.queue.status(graph_id) {
            Ok(status) if status.is_completed() => {}
            Ok(status) => {
                tracing::debug!(%version, build_number, state = ?status.state, "promote task not completed");
                return Ok(BuildOutcome::PromoteIncomplete);
            }
            Err(e) if e.is_not_found() => {
                tracing::info!(%version, build_number, %graph_id, "promote task no longer exists");
                writeln!(
                    out,
                    "Skipping {version} build {build_number} because promote task does not exist anymore"
                )
                .map_err(AuditError::Output)?;
                return Ok(BuildOutcome::PromoteMissing);
            }
            Err(e) => return Err(e.into()),
        }

        let SnapTask {
            task_id, completed, ..
        } = graph::find_snap_task(self.queue, graph_id)?;
        if !completed {
            return Ok(BuildOutcome::SnapIncomplete);
        }

        let mut mappings = Vec::with_capacity(EXPECTED_SNAP_ARTIFACTS);
        for source_url in snap_artifact_urls(self.queue, self.templates, &task_id)? {
            let is_checksum = urls::is_checksum(&source_url);
            let destination_url = self
                .templates
                .destination_url(version, *build_number, is_checksum);
            writeln!(out, "{destination_url} {source_url}").map_err(AuditError::Output)?;
            mappings.push(ArtifactMapping {
                destination_url,
                source_url,
                is_checksum,
            });
        }
        tracing::info!(%version, build_number, %task_id, "mapped snap artifacts");
        Ok(BuildOutcome::Mapped(mappings))
    }
}
