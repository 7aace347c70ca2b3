use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tempfile::TempPath;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::DashboardError;
use super::index;
use super::linker;

pub const DEFAULT_TAKE: usize = 200;
pub const MAX_TAKE: usize = 2000;

/// Clamp a caller-supplied report count to `[1, MAX_TAKE]`, defaulting to
/// `DEFAULT_TAKE`.
pub fn clamp_take(take: Option<i64>) -> usize {
    match take {
        None => DEFAULT_TAKE,
        Some(n) => n.clamp(1, MAX_TAKE as i64) as usize,
    }
}

#[derive(Debug, Clone)]
pub struct BundleRequest {
    pub take: usize,
    /// Wall-clock limit checked between archive entries.
    pub deadline: Option<Instant>,
}

impl BundleRequest {
    pub fn new(take: usize) -> Self {
        Self { take, deadline: None }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A freshly written archive. The file is deleted when this value (or the
/// `TempPath` taken from it) is dropped, unless `keep` is called.
#[derive(Debug)]
pub struct BundledArchive {
    path: TempPath,
    pub entries: Vec<String>,
    pub reports: usize,
}

impl BundledArchive {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_temp_path(self) -> TempPath {
        self.path
    }

    /// Disable deletion and return the archive location.
    pub fn keep(self) -> Result<PathBuf, DashboardError> {
        self.path
            .keep()
            .map_err(|e| DashboardError::Bundle(format!("Failed to keep archive: {}", e.error)))
    }
}

/// Package the `request.take` most recent artifact triples from `dir` into a
/// new zip archive created under `temp_dir`.
pub fn bundle_in(
    dir: &Path,
    request: &BundleRequest,
    temp_dir: &Path,
) -> Result<BundledArchive, DashboardError> {
    if !dir.is_dir() {
        return Err(DashboardError::NotFound(format!(
            "Reports directory not found: {}",
            dir.display()
        )));
    }

    let started = Instant::now();
    let archive = write_archive(dir, request, temp_dir).map_err(|e| match e {
        DashboardError::Timeout(_) | DashboardError::Bundle(_) => e,
        other => DashboardError::Bundle(other.to_string()),
    });

    match &archive {
        Ok(a) => info!(
            path = %a.path().display(),
            reports = a.reports,
            entries = a.entries.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report archive created"
        ),
        Err(e) => warn!(dir = %dir.display(), error = %e, "Report archive failed"),
    }
    archive
}

fn write_archive(
    dir: &Path,
    request: &BundleRequest,
    temp_dir: &Path,
) -> Result<BundledArchive, DashboardError> {
    let reports = index::recent(dir, request.take)?;

    let prefix = format!("guardtool_reports_{}_", Utc::now().format("%Y%m%d_%H%M%S_%3f"));
    let (file, path) = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".zip")
        .tempfile_in(temp_dir)?
        .into_parts();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(1));
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let mut entries = Vec::new();

    for report in &reports {
        if let Some(deadline) = request.deadline {
            if Instant::now() >= deadline {
                return Err(DashboardError::Timeout(format!(
                    "archive exceeded its time budget after {} entries",
                    entries.len()
                )));
            }
        }

        let siblings = linker::siblings(&report.path);
        let members = std::iter::once(report.path.clone())
            .chain(siblings.html)
            .chain(siblings.sarif);

        for member in members {
            let Some(name) = member.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            let mut source = match File::open(&member) {
                Ok(f) => f,
                // Removed between listing and packing.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(file = %member.display(), "Artifact vanished before packing");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            zip.start_file(name.as_str(), options)?;
            io::copy(&mut source, &mut zip)?;
            entries.push(name);
        }
    }

    let mut writer = zip.finish()?;
    writer.flush()?;

    Ok(BundledArchive {
        path,
        entries,
        reports: reports.len(),
    })
}
