use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::config::load_config;
use crate::common::connection::DEFAULT_MAX_FRAME_BYTES;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted frame body size in bytes.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Interval between metrics summary log lines. 0 disables reporting.
    #[serde(default)]
    pub report_interval_secs: u64,
}

fn default_max_frame_bytes() -> usize {
    DEFAULT_MAX_FRAME_BYTES
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.limits.max_frame_bytes, DEFAULT_MAX_FRAME_BYTES);
        assert_eq!(config.metrics.report_interval_secs, 0);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[limits]\nmax_frame_bytes = 4096\n\n[metrics]\nreport_interval_secs = 30\n"
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.limits.max_frame_bytes, 4096);
        assert_eq!(config.metrics.report_interval_secs, 30);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ServerConfig::from_file("no/such/config.toml").is_err());
    }
}
