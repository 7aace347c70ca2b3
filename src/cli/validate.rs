use std::path::PathBuf;

use guardtool_dashboard::config::parse_config;
use guardtool_dashboard::errors::DashboardError;

use crate::cli::commands::ValidateArgs;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), DashboardError> {
    let path = PathBuf::from(&args.config);
    let config = parse_config(&path).await?;
    let cwd = std::env::current_dir()?;
    let settings = config.resolve(&cwd);
    println!("Configuration is valid: {}", args.config);
    println!("Reports directory: {}", settings.reports_dir.display());
    Ok(())
}
