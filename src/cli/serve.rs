use guardtool_dashboard::api;
use guardtool_dashboard::config::{load_settings, DashboardConfig};
use guardtool_dashboard::errors::DashboardError;
use guardtool_dashboard::store::index;
use tracing::{info, warn};

use crate::cli::commands::ServeArgs;

pub async fn handle_serve(args: ServeArgs) -> Result<(), DashboardError> {
    let cli_layer = DashboardConfig {
        host: args.host.clone(),
        port: args.port,
        bundle_timeout_secs: args.bundle_timeout,
        ..args.source.layer()
    };
    let settings = load_settings(args.source.config_path(), cli_layer).await?;

    if !index::has_any(&settings.reports_dir) {
        warn!(dir = %settings.reports_dir.display(), "No reports found yet; report routes will redirect");
    }

    let addr = format!("{}:{}", settings.host, settings.port);
    info!(addr = %addr, "Starting dashboard server");

    let app = api::build_router(api::AppState::new(settings));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashboardError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
