use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Summary fields decoded from a generated `*_report.json`.
///
/// Only the fields the dashboard displays are read; everything else in the
/// document is ignored. The four headline fields are required, counts default
/// to zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[serde(alias = "TimestampUtc", deserialize_with = "utc_timestamp")]
    pub timestamp_utc: DateTime<Utc>,
    #[serde(alias = "Grade")]
    pub grade: String,
    #[serde(alias = "Score")]
    pub score: f64,
    #[serde(alias = "Status")]
    pub status: String,
    #[serde(default, alias = "Critical")]
    pub critical: u32,
    #[serde(default, alias = "High")]
    pub high: u32,
    #[serde(default, alias = "Medium")]
    pub medium: u32,
    #[serde(default, alias = "Low")]
    pub low: u32,
    #[serde(default, alias = "NewCritical")]
    pub new_critical: u32,
}

/// Accept RFC 3339 with an offset, or a zone-less timestamp taken as UTC
/// (e.g. `2026-10-01T08:30:00.1234567`).
fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// One row of the `/api/reports` listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListing {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub grade: String,
    pub score: f64,
    pub status: String,
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub new_critical: u32,
    pub has_sarif: bool,
}

impl ReportListing {
    pub fn new(name: String, summary: ReportSummary, has_sarif: bool) -> Self {
        Self {
            name,
            timestamp: summary.timestamp_utc,
            grade: summary.grade,
            score: summary.score,
            status: summary.status,
            critical: summary.critical,
            high: summary.high,
            medium: summary.medium,
            low: summary.low,
            new_critical: summary.new_critical,
            has_sarif,
        }
    }
}
