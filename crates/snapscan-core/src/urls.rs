//! Source (queue) and destination (archive) URLs of snap artifacts.

use url::Url;

use crate::error::RootUrlError;

const CHECKSUMS_SUFFIX: &str = ".checksums";
const RC_SUFFIX: &str = "rc";

/// Drops a trailing `rc` (`59.0rc` -> `59.0`); other versions are returned as is.
pub fn strip_rc(version: &str) -> &str {
    version.strip_suffix(RC_SUFFIX).unwrap_or(version)
}

/// URL roots the report is built from.
#[derive(Debug, Clone)]
pub struct UrlTemplates {
    queue_root: String,
    archive_root: String,
}

fn check_root(field: &'static str, value: &str) -> Result<(), RootUrlError> {
    Url::parse(value).map(drop).map_err(|source| RootUrlError {
        field,
        value: value.to_string(),
        source,
    })
}

impl UrlTemplates {
    pub fn new(queue_root: &str, archive_root: &str) -> Result<Self, RootUrlError> {
        check_root("queue_root_url", queue_root)?;
        check_root("archive_root_url", archive_root)?;
        Ok(Self {
            queue_root: queue_root.trim_end_matches('/').to_string(),
            archive_root: archive_root.trim_end_matches('/').to_string(),
        })
    }

    /// Where the queue serves `artifact_name` of `task_id`.
    pub fn artifact_url(&self, task_id: &str, artifact_name: &str) -> String {
        format!("{}/task/{task_id}/artifacts/{artifact_name}", self.queue_root)
    }

    /// Where the archive should hold the snap (or its checksums) for this build.
    ///
    /// The rc-stripped version is used in both the candidates directory and
    /// the file name.
    pub fn destination_url(&self, version: &str, build_number: u32, is_checksum: bool) -> String {
        let version = strip_rc(version);
        let postfix = if is_checksum { CHECKSUMS_SUFFIX } else { "" };
        format!(
            "{}/{version}-candidates/build{build_number}/snap/firefox-{version}.snap{postfix}",
            self.archive_root
        )
    }
}

/// True for the checksums file that accompanies a snap.
pub fn is_checksum(source_url: &str) -> bool {
    source_url.ends_with(CHECKSUMS_SUFFIX)
}
