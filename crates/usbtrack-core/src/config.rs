/// Runtime settings.
///
/// Every field has a default matching the classic tracker behaviour, so a
/// missing config file is normal. A file only needs the fields it changes:
///
/// ```json
/// { "poll_interval_ms": 500, "history_capacity": 10000 }
/// ```
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default poll period.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Default number of most-recent events shown in the live history view.
pub const DEFAULT_HISTORY_VIEW_LIMIT: usize = 100;

/// Default directory for exported reports, relative to the working directory.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Monitor and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Milliseconds between poll ticks.
    pub poll_interval_ms: u64,
    /// How many recent events the history table shows.
    pub history_view_limit: usize,
    /// Where exported reports are written.
    pub reports_dir: PathBuf,
    /// Maximum events kept in memory. `None` keeps everything.
    pub history_capacity: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            history_view_limit: DEFAULT_HISTORY_VIEW_LIMIT,
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            history_capacity: None,
        }
    }
}

impl MonitorConfig {
    /// Poll period as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Load `path` if it exists; fall back to defaults otherwise.
    ///
    /// A present-but-invalid file is logged and ignored rather than
    /// preventing startup.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{e} -- using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "poll_interval_ms must be greater than zero".to_owned(),
            });
        }
        if self.history_capacity == Some(0) {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "history_capacity must be greater than zero when set".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_classic_behaviour() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.history_view_limit, 100);
        assert_eq!(config.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.history_capacity, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "poll_interval_ms": 250, "history_capacity": 50 }"#);
        let config = MonitorConfig::load(file.path()).unwrap();
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.history_capacity, Some(50));
        assert_eq!(config.history_view_limit, DEFAULT_HISTORY_VIEW_LIMIT);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let file = write_config(r#"{ "poll_interval_ms": 0 }"#);
        assert!(matches!(
            MonitorConfig::load(file.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let file = write_config(r#"{ "poll_interval": 5 }"#);
        assert!(matches!(
            MonitorConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("usbtrack.json");
        assert_eq!(MonitorConfig::load_or_default(&missing), MonitorConfig::default());

        let broken = write_config("{ not json");
        assert_eq!(
            MonitorConfig::load_or_default(broken.path()),
            MonitorConfig::default()
        );
    }
}
