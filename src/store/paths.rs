use std::path::{Component, Path, PathBuf};

/// Subdirectory of the root that holds reports when no override is configured.
pub const DEFAULT_REPORTS_SUBDIR: &str = "Reports";

/// Resolve the reports directory from a base root and an optional output
/// directory override. Never fails and never touches the filesystem.
pub fn resolve(base_root: &Path, override_out_dir: Option<&str>) -> PathBuf {
    let joined = match override_out_dir.map(str::trim).filter(|s| !s.is_empty()) {
        None => base_root.join(DEFAULT_REPORTS_SUBDIR),
        Some(out) => {
            let out = Path::new(out);
            if out.is_absolute() {
                out.to_path_buf()
            } else {
                base_root.join(out)
            }
        }
    };
    normalize(&joined)
}

/// Turn the configured root (or `cwd` when unset) into an absolute path.
pub fn absolutize_root(root: Option<&str>, cwd: &Path) -> PathBuf {
    match root.map(str::trim).filter(|s| !s.is_empty()) {
        None => normalize(cwd),
        Some(r) => {
            let r = Path::new(r);
            if r.is_absolute() {
                normalize(r)
            } else {
                normalize(&cwd.join(r))
            }
        }
    }
}

/// Lexically collapse `.` and `..` components. `..` never climbs above the
/// filesystem root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
