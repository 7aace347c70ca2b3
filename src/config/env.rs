use tracing::debug;

use super::types::DashboardConfig;

pub const ENV_ROOT: &str = "GUARDTOOL_ROOT";
pub const ENV_OUT_DIR: &str = "GUARDTOOL_OUTDIR";

/// Build the environment configuration layer. Blank variables count as unset.
pub fn from_env() -> DashboardConfig {
    from_lookup(|key| std::env::var(key).ok())
}

pub fn from_lookup<F>(lookup: F) -> DashboardConfig
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| {
        let value = lookup(key).filter(|v| !v.trim().is_empty());
        if value.is_some() {
            debug!(var = %key, "Configuration taken from environment");
        }
        value
    };

    DashboardConfig {
        root: read(ENV_ROOT),
        out_dir: read(ENV_OUT_DIR),
        ..Default::default()
    }
}

/// Expand a `$VAR` reference in a config file value. Unset variables leave
/// the literal in place.
pub fn expand_var(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved config value from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}
