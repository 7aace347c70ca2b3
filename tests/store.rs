use std::fs::{self, File};
use std::path::Path;

use guardtool_dashboard::store::{bundle, clamp_take, guard, index, linker, paths, BundleRequest, Presence};
use serde_json::json;
use tempfile::TempDir;

fn write_report(dir: &Path, stem: &str) {
    let body = json!({
        "timestampUtc": "2026-09-30T23:59:59Z",
        "grade": "B",
        "score": 74.5,
        "status": "WARN",
        "critical": 1,
        "high": 0,
        "medium": 4,
        "low": 9,
        "newCritical": 1
    });
    fs::write(dir.join(format!("{stem}_report.json")), body.to_string()).unwrap();
}

fn write_triple(dir: &Path, stem: &str) {
    write_report(dir, stem);
    fs::write(dir.join(format!("{stem}_report.html")), format!("<h1>{stem}</h1>")).unwrap();
    fs::write(dir.join(format!("{stem}_report.sarif.json")), "{\"version\":\"2.1.0\"}").unwrap();
}

fn archive_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_empty_directory_with_unrelated_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "hi").unwrap();
    fs::write(dir.path().join("x_report.html"), "<p>").unwrap();

    assert!(index::list(dir.path(), 200).unwrap().is_empty());
    assert!(!index::has_any(dir.path()));
    assert_eq!(index::probe(dir.path()), Presence::Empty);
}

#[test]
fn test_recency_order_and_latest() {
    let dir = TempDir::new().unwrap();
    for stem in ["b", "a", "c"] {
        write_report(dir.path(), stem);
    }

    let names: Vec<String> = index::list(dir.path(), 200).unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["c_report.json", "b_report.json", "a_report.json"]);
    assert_eq!(index::latest(dir.path()).unwrap(), dir.path().join("c_report.json"));
    assert!(index::has_any(dir.path()));
}

#[test]
fn test_timestamp_prefixed_names_sort_chronologically() {
    let dir = TempDir::new().unwrap();
    for stem in ["20260102_000000", "20251231_235959", "20260101_120000"] {
        write_report(dir.path(), stem);
    }
    let latest = index::latest(dir.path()).unwrap();
    assert!(latest.ends_with("20260102_000000_report.json"));
}

#[test]
fn test_siblings_sarif_only() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), "X");
    fs::write(dir.path().join("X_report.sarif.json"), "{}").unwrap();

    let siblings = linker::siblings(&dir.path().join("X_report.json"));
    assert!(siblings.sarif.is_some());
    assert!(siblings.html.is_none());
}

#[test]
fn test_bundle_three_triples_with_take_five() {
    let reports = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    for stem in ["r1", "r2", "r3"] {
        write_triple(reports.path(), stem);
    }

    let archive = bundle::bundle_in(reports.path(), &BundleRequest::new(5), out.path()).unwrap();
    let names = archive_names(archive.path());
    assert!(names.len() <= 9);
    assert_eq!(names.len(), 9);
    assert_eq!(archive.reports, 3);
    assert!(names.contains(&"r2_report.sarif.json".to_string()));
}

#[test]
fn test_bundle_twice_yields_distinct_files() {
    let reports = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_triple(reports.path(), "r1");

    let first = bundle::bundle_in(reports.path(), &BundleRequest::new(5), out.path()).unwrap();
    let second = bundle::bundle_in(reports.path(), &BundleRequest::new(5), out.path()).unwrap();

    assert_ne!(first.path(), second.path());
    assert!(first.path().exists());
    assert!(second.path().exists());
    assert_eq!(archive_names(first.path()), archive_names(second.path()));
}

#[test]
fn test_bundle_respects_take_and_order() {
    let reports = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    for stem in ["a", "b", "c"] {
        write_triple(reports.path(), stem);
    }

    let archive = bundle::bundle_in(reports.path(), &BundleRequest::new(clamp_take(Some(2))), out.path()).unwrap();
    assert_eq!(archive.entries[0], "c_report.json");
    let names = archive_names(archive.path());
    assert_eq!(names.len(), 6);
    assert!(!names.iter().any(|n| n.starts_with("a_")));
}

#[test]
fn test_take_clamping() {
    assert_eq!(clamp_take(Some(0)), 1);
    assert_eq!(clamp_take(Some(-5)), 1);
    assert_eq!(clamp_take(Some(5000)), 2000);
    assert_eq!(clamp_take(None), 200);
}

#[test]
fn test_malformed_json_does_not_abort_listing() {
    let dir = TempDir::new().unwrap();
    write_report(dir.path(), "good1");
    fs::write(dir.path().join("half_report.json"), "{\"timestampUtc\":").unwrap();
    write_report(dir.path(), "good2");

    let rows = index::list(dir.path(), 200).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["good2_report.json", "good1_report.json"]);
    assert_eq!(rows[0].score, 74.5);
    assert_eq!(rows[0].new_critical, 1);
}

#[test]
fn test_guard_tracks_directory_state() {
    let dir = TempDir::new().unwrap();
    assert!(guard::should_block("/download/latest/html", guard::REPORT_ROUTE_PREFIXES, dir.path()));

    write_report(dir.path(), "first");
    assert!(!guard::should_block("/download/latest/html", guard::REPORT_ROUTE_PREFIXES, dir.path()));
}

#[test]
fn test_resolved_directory_is_used_by_index() {
    let root = TempDir::new().unwrap();
    let reports_dir = paths::resolve(root.path(), None);
    assert!(reports_dir.ends_with("Reports"));
    assert!(!index::has_any(&reports_dir));

    fs::create_dir(&reports_dir).unwrap();
    write_report(&reports_dir, "r");
    assert!(index::has_any(&reports_dir));
}
