//! Archived release files: discovery and promote-graph extraction.
//!
//! A release file is one JSON document per version, with one `inflight`
//! entry per build attempt. Older files list graph IDs as plain strings
//! (the promote graph first); newer ones tag each graph with its type.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuditError;

/// Graph types that identify the promote graph in the tagged schema.
const PROMOTE_GRAPH_TYPES: [&str; 2] = ["promote", "promote_rc"];

/// Lists release files in `dir`: regular `*.json` files whose name contains `marker`.
///
/// Sorted by path. A missing directory is an error.
pub fn discover(dir: &Path, marker: &str) -> Result<Vec<PathBuf>, AuditError> {
    let read_dir_err = |source| AuditError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(".json") && name.contains(marker) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// `graphids` of one build, in any of the shapes the archive has used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GraphIds {
    Single(String),
    Typed(Vec<(String, String)>),
    Legacy(Vec<String>),
}

impl GraphIds {
    fn is_empty(&self) -> bool {
        match self {
            GraphIds::Single(id) => id.is_empty(),
            GraphIds::Typed(pairs) => pairs.is_empty(),
            GraphIds::Legacy(ids) => ids.is_empty(),
        }
    }

    fn promote_candidates(&self) -> Vec<&str> {
        match self {
            GraphIds::Single(id) => vec![id.as_str()],
            GraphIds::Legacy(ids) => ids.first().map(String::as_str).into_iter().collect(),
            GraphIds::Typed(pairs) => pairs
                .iter()
                .filter(|(kind, _)| PROMOTE_GRAPH_TYPES.contains(&kind.as_str()))
                .map(|(_, id)| id.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InflightBuild {
    pub buildnum: u32,
    pub graphids: GraphIds,
}

/// Parsed release file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseFile {
    pub version: String,
    pub inflight: Vec<InflightBuild>,
}

/// The promote graph of one build of one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteGraph {
    pub graph_id: String,
    pub version: String,
    pub build_number: u32,
}

impl ReleaseFile {
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let bytes = fs::read(path).map_err(|source| AuditError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| AuditError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Promote graph of every build that has graph IDs, in file order.
    ///
    /// Lazy: a build with zero or several promote graphs yields an error at
    /// its own position, after the builds before it.
    pub fn promote_graphs(&self) -> impl Iterator<Item = Result<PromoteGraph, AuditError>> + '_ {
        self.inflight
            .iter()
            .filter(|build| !build.graphids.is_empty())
            .map(move |build| {
                match build.graphids.promote_candidates().as_slice() {
                    [graph_id] => Ok(PromoteGraph {
                        graph_id: graph_id.to_string(),
                        version: self.version.clone(),
                        build_number: build.buildnum,
                    }),
                    _ => Err(AuditError::AmbiguousPromoteGraph {
                        version: self.version.clone(),
                        build_number: build.buildnum,
                        graph_ids: format!("{:?}", build.graphids),
                    }),
                }
            })
    }
}
