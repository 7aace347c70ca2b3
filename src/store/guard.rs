use std::path::Path;

use super::index;

/// Route prefixes that only make sense once at least one report exists.
pub const REPORT_ROUTE_PREFIXES: &[&str] = &["/Reports", "/reports", "/download"];

/// Where blocked requests are sent.
pub const FALLBACK_LOCATION: &str = "/?noreports=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Block,
}

/// Segment-aware, ASCII case-insensitive prefix test: `/reports` covers
/// `/reports` and `/reports/x` but not `/reportsx`.
pub fn under_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if path.len() < prefix.len() || !path.is_char_boundary(prefix.len()) {
        return false;
    }
    let (head, rest) = path.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix) && (rest.is_empty() || rest.starts_with('/'))
}

/// True when `path` falls under any of `prefixes`. Pure string check.
pub fn is_guarded(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| under_prefix(path, p))
}

/// True when `path` is a report route and the reports directory has nothing
/// to show. The directory is only read for guarded routes.
pub fn should_block(path: &str, prefixes: &[&str], dir: &Path) -> bool {
    is_guarded(path, prefixes) && !index::has_any(dir)
}

pub fn evaluate(path: &str, prefixes: &[&str], dir: &Path) -> GuardDecision {
    if should_block(path, prefixes, dir) {
        GuardDecision::Block
    } else {
        GuardDecision::Pass
    }
}
