//! Configuration constants and utilities for niypher
//!
//! Storage location for the persisted theme flag and the timing contracts of
//! the view layer.

use std::path::PathBuf;
use std::time::Duration;

/// Default storage file path for niypher
pub const DEFAULT_STORAGE_PATH: &str = "~/.niypher/storage.json";

/// Environment variable name for overriding the storage path
pub const STORAGE_PATH_ENV_VAR: &str = "NIYPHER_STORAGE_PATH";

/// Environment variable enabling log output (takes an `EnvFilter` directive)
pub const LOG_ENV_VAR: &str = "NIYPHER_LOG";

/// Log destination; the terminal UI owns stdout and stderr
pub const DEFAULT_LOG_PATH: &str = "~/.niypher/niypher.log";

/// Site key handed to the human-verification widget
pub const VERIFICATION_SITE_KEY: &str = "0x4AAAAAACJ_rMxcCB0FrOve";

/// Get the storage file path, checking environment variable first, then falling back to default
pub fn get_storage_path() -> String {
    std::env::var_os(STORAGE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::full(path).map_or_else(|_| path.into(), |p| p.into_owned()))
}

/// Timing and sizing knobs of the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Duration of the slide animation; the dual-pane container lives this long
    pub settle_delay: Duration,
    /// Wait before re-attaching auth listeners after content settles
    pub rebind_delay: Duration,
    pub notification_duration: Duration,
    pub search_debounce: Duration,
    pub search_cache_capacity: usize,
    pub suggestion_limit: usize,
    pub verification_site_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            rebind_delay: Duration::from_millis(10),
            notification_duration: Duration::from_millis(3000),
            search_debounce: Duration::from_millis(300),
            search_cache_capacity: 64,
            suggestion_limit: 10,
            verification_site_key: VERIFICATION_SITE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_storage_path() {
        assert_eq!(DEFAULT_STORAGE_PATH, "~/.niypher/storage.json");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(STORAGE_PATH_ENV_VAR, "NIYPHER_STORAGE_PATH");
    }

    #[test]
    fn test_get_storage_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(STORAGE_PATH_ENV_VAR);

        std::env::remove_var(STORAGE_PATH_ENV_VAR);
        assert_eq!(get_storage_path(), DEFAULT_STORAGE_PATH);

        let test_path = "/custom/storage.json";
        std::env::set_var(STORAGE_PATH_ENV_VAR, test_path);
        assert_eq!(get_storage_path(), test_path);

        // Restore original state
        match original {
            Some(val) => std::env::set_var(STORAGE_PATH_ENV_VAR, val),
            None => std::env::remove_var(STORAGE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn test_expand_path_keeps_absolute_paths() {
        assert_eq!(expand_path("/tmp/x.json"), PathBuf::from("/tmp/x.json"));
        assert!(expand_path("~/x.json").ends_with("x.json"));
    }

    #[test]
    fn test_default_timings() {
        let config = AppConfig::default();
        assert_eq!(config.settle_delay, Duration::from_millis(500));
        assert_eq!(config.rebind_delay, Duration::from_millis(10));
        assert_eq!(config.suggestion_limit, 10);
    }
}
