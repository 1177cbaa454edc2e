use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP timeouts for queue requests (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// A `(version, build)` pair to add to the compiled-in known-build table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownBuildEntry {
    pub version: String,
    pub build_number: u32,
}

/// Global configuration loaded from `~/.config/snapscan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Directory holding the archived release JSON files.
    pub releases_dir: PathBuf,
    /// Substring a file name must contain to be scanned.
    pub filename_marker: String,
    /// Root of the Taskcluster queue API (including `/v1`).
    pub queue_root_url: String,
    /// Root of the public candidates archive.
    pub archive_root_url: String,
    #[serde(default)]
    pub http: Option<HttpConfig>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Builds already handled in addition to the compiled-in table.
    #[serde(default)]
    pub extra_known_builds: Vec<KnownBuildEntry>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            releases_dir: PathBuf::from("releasewarrior-data/archive/firefox"),
            filename_marker: "-59".to_string(),
            queue_root_url: "https://queue.taskcluster.net/v1".to_string(),
            archive_root_url: "https://archive.mozilla.org/pub/firefox/candidates".to_string(),
            http: None,
            retry: None,
            extra_known_builds: Vec::new(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("snapscan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AuditConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AuditConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(&path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: AuditConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
