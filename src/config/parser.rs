use std::path::Path;

use tracing::{info, warn};

use crate::errors::DashboardError;
use super::env::{self, expand_var};
use super::types::{DashboardConfig, DashboardSettings};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<DashboardConfig, DashboardError> {
    if !path.exists() {
        return Err(DashboardError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(DashboardError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<DashboardConfig, DashboardError> {
    // An empty file deserializes to unit, not a mapping.
    if content.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }

    let mut config: DashboardConfig = serde_yaml::from_str(content)?;
    config.root = config.root.as_deref().map(expand_var);
    config.out_dir = config.out_dir.as_deref().map(expand_var);
    config.archive_dir = config.archive_dir.as_deref().map(expand_var);

    validate(&config)?;
    Ok(config)
}

fn validate(config: &DashboardConfig) -> Result<(), DashboardError> {
    if config.port == Some(0) {
        return Err(DashboardError::Config("port must be non-zero".into()));
    }
    if config.bundle_timeout_secs == Some(0) {
        return Err(DashboardError::Config("bundle_timeout_secs must be at least 1".into()));
    }
    if let Some(host) = &config.host {
        if host.trim().is_empty() {
            warn!("Empty host in config, falling back to default");
        }
    }
    Ok(())
}

/// Build the process settings: config file, then environment, then CLI
/// flags, each layer overriding the previous one.
pub async fn load_settings(
    config_path: Option<&Path>,
    cli: DashboardConfig,
) -> Result<DashboardSettings, DashboardError> {
    let file = match config_path {
        Some(path) => parse_config(path).await?,
        None => DashboardConfig::default(),
    };

    let mut merged = file.merge(env::from_env()).merge(cli);
    if merged.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
        merged.host = None;
    }

    let cwd = std::env::current_dir()
        .map_err(|e| DashboardError::Config(format!("Cannot determine working directory: {}", e)))?;
    let settings = merged.resolve(&cwd);

    info!(
        root = %settings.root.display(),
        reports_dir = %settings.reports_dir.display(),
        "Resolved reports directory"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = "root: /srv/guard\nout_dir: nightly\nhost: 127.0.0.1\nport: 9090\nbundle_timeout_secs: 15\narchive_dir: /var/tmp/guard\n";
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(config.root.as_deref(), Some("/srv/guard"));
        assert_eq!(config.out_dir.as_deref(), Some("nightly"));
        assert_eq!(config.port, Some(9090));
        assert_eq!(config.bundle_timeout_secs, Some(15));
        assert_eq!(config.archive_dir.as_deref(), Some("/var/tmp/guard"));
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_config_str("\n").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_zero_port_rejected() {
        assert!(matches!(parse_config_str("port: 0\n"), Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse_config_str("bundle_timeout_secs: 0\n").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(parse_config_str("root: [unclosed"), Err(DashboardError::Yaml(_))));
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = parse_config(Path::new("/nonexistent/guardtool.yaml")).await.unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[tokio::test]
    async fn test_cli_layer_overrides_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("guardtool.yaml");
        std::fs::write(&path, "root: /srv/guard\nout_dir: /var/reports\nport: 9000\n").unwrap();

        let cli = DashboardConfig {
            out_dir: Some("/tmp/override".into()),
            ..Default::default()
        };
        let settings = load_settings(Some(&path), cli).await.unwrap();
        assert_eq!(settings.reports_dir, std::path::PathBuf::from("/tmp/override"));
        assert_eq!(settings.port, 9000);
    }
}
