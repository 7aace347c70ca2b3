use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::errors::DashboardError;

/// Content type served for a file, chosen by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}

/// Resolve a requested file name to a regular file inside `dir`.
///
/// The name must be a single plain path component, and after following
/// symlinks the file must still live under the canonical `dir`. Every
/// rejection is reported as `NotFound`.
pub fn resolve_within(dir: &Path, name: &str) -> Result<PathBuf, DashboardError> {
    let not_found = || DashboardError::NotFound(name.to_string());

    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if name.is_empty() || name.contains(['/', '\\', '\0']) || !single_normal {
        warn!(requested = %name, "Rejected report file name");
        return Err(not_found());
    }

    let root = dir.canonicalize().map_err(|_| not_found())?;
    let resolved = root.join(name).canonicalize().map_err(|_| not_found())?;
    if !resolved.starts_with(&root) {
        warn!(requested = %name, resolved = %resolved.display(), "Report file escapes reports directory");
        return Err(not_found());
    }
    if !resolved.is_file() {
        return Err(not_found());
    }
    Ok(resolved)
}
