use std::path::PathBuf;
use std::time::Instant;

use guardtool_dashboard::config::load_settings;
use guardtool_dashboard::errors::DashboardError;
use guardtool_dashboard::store::{bundle, clamp_take, BundleRequest};
use tracing::info;

use crate::cli::commands::BundleArgs;

pub async fn handle_bundle(args: BundleArgs) -> Result<(), DashboardError> {
    let settings = load_settings(args.source.config_path(), args.source.layer()).await?;
    let take = clamp_take(args.take);
    let request = BundleRequest::new(take).with_deadline(Instant::now() + settings.bundle_timeout);
    let dir = settings.reports_dir.clone();
    let archive_dir = settings.archive_dir.clone();

    let archive = tokio::task::spawn_blocking(move || bundle::bundle_in(&dir, &request, &archive_dir))
        .await
        .map_err(|e| DashboardError::Bundle(format!("Bundling task failed: {}", e)))??;
    let entries = archive.entries.len();
    let reports = archive.reports;

    let location = match args.output {
        Some(output) => {
            let output = PathBuf::from(output);
            tokio::fs::copy(archive.path(), &output).await?;
            output
        }
        None => archive.keep()?,
    };

    info!(reports, entries, path = %location.display(), "Archive written");
    println!("{}", location.display());
    Ok(())
}
