pub mod report;

pub use report::{ReportListing, ReportSummary};
