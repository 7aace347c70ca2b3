use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bundling failed: {0}")]
    Bundle(String),

    #[error("Bundling timed out: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DashboardError::Config(_) | DashboardError::Yaml(_) => 2,
            DashboardError::NotFound(_) => 3,
            DashboardError::Bundle(_) | DashboardError::Timeout(_) | DashboardError::Archive(_) => 4,
            _ => 1,
        }
    }

    /// True for failures raised while building an archive.
    pub fn is_bundling_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::Bundle(_) | DashboardError::Timeout(_) | DashboardError::Archive(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_exit_code() {
        let err = DashboardError::Config("bad root".into());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_bundle_exit_code() {
        assert_eq!(DashboardError::Bundle("disk full".into()).exit_code(), 4);
        assert_eq!(DashboardError::Timeout("60s".into()).exit_code(), 4);
    }

    #[test]
    fn test_bundling_failure_variants() {
        assert!(DashboardError::Archive(zip::result::ZipError::FileNotFound).is_bundling_failure());
        let err = DashboardError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!err.is_bundling_failure());
        assert!(!DashboardError::NotFound("x".into()).is_bundling_failure());
    }
}
