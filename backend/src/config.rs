use std::env;
use std::path::PathBuf;

pub const DATA_PATH_ENV: &str = "LAUNCH_DATA_PATH";
pub const LOG_ENV: &str = "DASH_LOG";

/// Relative to the working directory; matches the file bundled at the workspace root.
pub const DEFAULT_DATA_PATH: &str = "data/spacex_launch_dash.csv";
pub const DEFAULT_LOG: &str = "info";

/// Process settings, read once at startup. The listen address is not here:
/// it comes from the leptos `site-addr` (overridable with `LEPTOS_SITE_ADDR`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            data_path: PathBuf::from(read(DATA_PATH_ENV, DEFAULT_DATA_PATH)),
            log_filter: read(LOG_ENV, DEFAULT_LOG),
        }
    }
}
