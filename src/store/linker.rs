use std::path::{Path, PathBuf};

pub const JSON_SUFFIX: &str = "_report.json";
pub const HTML_SUFFIX: &str = "_report.html";
pub const SARIF_SUFFIX: &str = "_report.sarif.json";

/// The shared filename prefix of an artifact triple.
///
/// Grammar: `{stem}_report.json`, `{stem}_report.html`,
/// `{stem}_report.sarif.json`. The suffix match is ASCII case-insensitive and
/// the stem must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReportStem {
    stem: String,
    json_name: String,
}

impl ReportStem {
    /// Parse a report JSON file name. Returns `None` for anything that is not
    /// `{stem}_report.json`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let split = file_name.len().checked_sub(JSON_SUFFIX.len())?;
        if split == 0 || !file_name.is_char_boundary(split) {
            return None;
        }
        let (stem, suffix) = file_name.split_at(split);
        if !suffix.eq_ignore_ascii_case(JSON_SUFFIX) {
            return None;
        }
        Some(Self {
            stem: stem.to_string(),
            json_name: file_name.to_string(),
        })
    }

    /// Parse the file name component of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()?.to_str().and_then(Self::parse)
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name of the given artifact for this stem. The JSON member keeps
    /// its on-disk spelling.
    pub fn file_name(&self, kind: ArtifactKind) -> String {
        match kind {
            ArtifactKind::Json => self.json_name.clone(),
            ArtifactKind::Html => format!("{}{}", self.stem, HTML_SUFFIX),
            ArtifactKind::Sarif => format!("{}{}", self.stem, SARIF_SUFFIX),
        }
    }

    pub fn path_in(&self, dir: &Path, kind: ArtifactKind) -> PathBuf {
        dir.join(self.file_name(kind))
    }
}

/// One member of an artifact triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Json,
    Html,
    Sarif,
}

impl ArtifactKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "html" => Some(Self::Html),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ArtifactKind::Html => "text/html; charset=utf-8",
            ArtifactKind::Json | ArtifactKind::Sarif => "application/json; charset=utf-8",
        }
    }
}

/// Sibling artifacts that exist on disk at lookup time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Siblings {
    pub html: Option<PathBuf>,
    pub sarif: Option<PathBuf>,
}

/// Locate the HTML and SARIF siblings of a report JSON. Existence is checked
/// on every call. Paths outside the stem grammar have no siblings.
pub fn siblings(report_json_path: &Path) -> Siblings {
    let Some(stem) = ReportStem::from_path(report_json_path) else {
        return Siblings::default();
    };
    let dir = report_json_path.parent().unwrap_or_else(|| Path::new(""));

    let existing = |kind| {
        let path = stem.path_in(dir, kind);
        path.is_file().then_some(path)
    };

    Siblings {
        html: existing(ArtifactKind::Html),
        sarif: existing(ArtifactKind::Sarif),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_extracts_stem() {
        let stem = ReportStem::parse("20260101_120000_report.json").unwrap();
        assert_eq!(stem.stem(), "20260101_120000");
        assert_eq!(stem.file_name(ArtifactKind::Html), "20260101_120000_report.html");
        assert_eq!(stem.file_name(ArtifactKind::Sarif), "20260101_120000_report.sarif.json");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let stem = ReportStem::parse("Nightly_REPORT.JSON").unwrap();
        assert_eq!(stem.stem(), "Nightly");
        assert_eq!(stem.file_name(ArtifactKind::Json), "Nightly_REPORT.JSON");
    }

    #[test]
    fn test_parse_rejects_non_conforming_names() {
        assert!(ReportStem::parse("_report.json").is_none());
        assert!(ReportStem::parse("x_report.sarif.json").is_none());
        assert!(ReportStem::parse("x_report.html").is_none());
        assert!(ReportStem::parse("report.json").is_none());
        assert!(ReportStem::parse("notes.txt").is_none());
    }

    #[test]
    fn test_siblings_reports_only_existing_files() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("X_report.json");
        fs::write(&json, "{}").unwrap();
        fs::write(dir.path().join("X_report.sarif.json"), "{}").unwrap();

        let found = siblings(&json);
        assert!(found.html.is_none());
        assert_eq!(found.sarif, Some(dir.path().join("X_report.sarif.json")));
    }

    #[test]
    fn test_siblings_rechecked_each_call() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("X_report.json");
        fs::write(&json, "{}").unwrap();
        assert!(siblings(&json).html.is_none());

        fs::write(dir.path().join("X_report.html"), "<html></html>").unwrap();
        assert!(siblings(&json).html.is_some());
    }

    #[test]
    fn test_siblings_of_non_conforming_path_are_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("X_report.html"), "").unwrap();
        assert_eq!(siblings(&dir.path().join("X.json")), Siblings::default());
    }

    #[test]
    fn test_artifact_kind_from_name() {
        assert_eq!(ArtifactKind::from_name("SARIF"), Some(ArtifactKind::Sarif));
        assert_eq!(ArtifactKind::from_name("pdf"), None);
    }
}
