use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::paths;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BUNDLE_TIMEOUT_SECS: u64 = 60;

/// One layer of dashboard configuration. Layers are merged with
/// [`DashboardConfig::merge`]; later layers win field by field.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Base directory. Defaults to the working directory.
    pub root: Option<String>,
    /// Reports directory override, absolute or relative to `root`.
    pub out_dir: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub bundle_timeout_secs: Option<u64>,
    /// Scratch directory for archives. Defaults to the system temp dir.
    pub archive_dir: Option<String>,
}

impl DashboardConfig {
    pub fn merge(self, over: DashboardConfig) -> DashboardConfig {
        DashboardConfig {
            root: over.root.or(self.root),
            out_dir: over.out_dir.or(self.out_dir),
            host: over.host.or(self.host),
            port: over.port.or(self.port),
            bundle_timeout_secs: over.bundle_timeout_secs.or(self.bundle_timeout_secs),
            archive_dir: over.archive_dir.or(self.archive_dir),
        }
    }

    /// Resolve into immutable settings. Relative roots are taken against `cwd`.
    pub fn resolve(self, cwd: &Path) -> DashboardSettings {
        let root = paths::absolutize_root(self.root.as_deref(), cwd);
        let reports_dir = paths::resolve(&root, self.out_dir.as_deref());
        let archive_dir = match self.archive_dir.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(dir) => paths::absolutize_root(Some(dir), &root),
            None => std::env::temp_dir(),
        };
        DashboardSettings {
            root,
            reports_dir,
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            bundle_timeout: Duration::from_secs(
                self.bundle_timeout_secs.unwrap_or(DEFAULT_BUNDLE_TIMEOUT_SECS),
            ),
            archive_dir,
        }
    }
}

/// Process-wide settings, built once at start and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub root: PathBuf,
    pub reports_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// Wall-clock budget for building one archive.
    pub bundle_timeout: Duration,
    /// Where archives are written before being streamed.
    pub archive_dir: PathBuf,
}

impl DashboardSettings {
    /// Settings serving `reports_dir` directly, with defaults elsewhere.
    pub fn for_reports_dir(reports_dir: impl Into<PathBuf>) -> Self {
        let reports_dir = reports_dir.into();
        Self {
            root: reports_dir.parent().map(Path::to_path_buf).unwrap_or_else(|| reports_dir.clone()),
            reports_dir,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            bundle_timeout: Duration::from_secs(DEFAULT_BUNDLE_TIMEOUT_SECS),
            archive_dir: std::env::temp_dir(),
        }
    }
}
