//! Report store: directory resolution, discovery, linking, and bundling of
//! the `*_report.json` / `.html` / `.sarif.json` artifacts written by the
//! report generator. Nothing here writes to the reports directory.

pub mod paths;
pub mod linker;
pub mod index;
pub mod bundle;
pub mod guard;
pub mod files;

pub use bundle::{clamp_take, BundleRequest, BundledArchive};
pub use index::{Presence, ReportEntry};
pub use linker::{ArtifactKind, ReportStem, Siblings};
