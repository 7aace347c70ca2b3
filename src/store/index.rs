use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::DashboardError;
use crate::models::report::{ReportListing, ReportSummary};
use super::linker::{self, ArtifactKind, ReportStem};

/// Listing cap applied by the HTTP API.
pub const API_LIST_LIMIT: usize = 200;

/// Outcome of an "are there any reports" probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    Empty,
    /// The probe hit an I/O error. Callers treat this as empty.
    Unknown,
}

impl Presence {
    pub fn is_found(self) -> bool {
        matches!(self, Presence::Found)
    }
}

/// A report JSON file found in the reports directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub stem: ReportStem,
    pub path: PathBuf,
}

impl ReportEntry {
    pub fn file_name(&self) -> String {
        self.stem.file_name(ArtifactKind::Json)
    }
}

/// The `take` most recent report JSON files, newest first. A missing
/// directory yields an empty list.
pub fn recent(dir: &Path, take: usize) -> Result<Vec<ReportEntry>, DashboardError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for item in fs::read_dir(dir)? {
        let item = match item {
            Ok(item) => item,
            // Entries can disappear while the generator is writing.
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        // `is_file` follows symlinks and is false when metadata fails.
        if !item.path().is_file() {
            continue;
        }
        let Some(name) = item.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if let Some(stem) = ReportStem::parse(&name) {
            entries.push(ReportEntry { stem, path: item.path() });
        }
    }

    entries.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    entries.truncate(take);
    Ok(entries)
}

/// Decode the listing rows for the newest `limit` reports. Files that fail to
/// read or parse are skipped.
pub fn list(dir: &Path, limit: usize) -> Result<Vec<ReportListing>, DashboardError> {
    let entries = recent(dir, limit)?;
    let mut listings = Vec::with_capacity(entries.len());

    for entry in entries {
        let summary = match read_summary(&entry.path) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(file = %entry.path.display(), error = %e, "Skipping unreadable report");
                continue;
            }
        };
        let has_sarif = linker::siblings(&entry.path).sarif.is_some();
        listings.push(ReportListing::new(entry.file_name(), summary, has_sarif));
    }

    debug!(dir = %dir.display(), count = listings.len(), "Listed reports");
    Ok(listings)
}

pub fn read_summary(path: &Path) -> Result<ReportSummary, DashboardError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Check for at least one report JSON, stopping at the first match.
pub fn probe(dir: &Path) -> Presence {
    let items = match fs::read_dir(dir) {
        Ok(items) => items,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Presence::Empty,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Report probe failed");
            return Presence::Unknown;
        }
    };

    for item in items {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Report probe failed");
                return Presence::Unknown;
            }
        };
        let conforming = item
            .file_name()
            .to_str()
            .and_then(ReportStem::parse)
            .is_some();
        if conforming && item.path().is_file() {
            return Presence::Found;
        }
    }
    Presence::Empty
}

pub fn has_any(dir: &Path) -> bool {
    probe(dir).is_found()
}

/// Path of the newest report JSON, if any.
pub fn latest(dir: &Path) -> Option<PathBuf> {
    match recent(dir, 1) {
        Ok(mut entries) => entries.pop().map(|e| e.path),
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Latest report lookup failed");
            None
        }
    }
}
