//! # Configuration
//!
//! `meridian.yaml`, all keys optional:
//!
//! ```yaml
//! sources:
//!   airtable:
//!     base_url: https://api.airtable.com
//!     base_id: appceDWWzmrL1awQi
//!     table_id: tblNt3dQ9b6F32QTU
//!     timeout_secs: 30
//!   api_key_env: MERIDIAN_AIRTABLE_API_KEY
//!   preload: data/preload.js
//!   csv: data/interjust_snapshot.csv
//! cache_dir: .meridian
//! refresh_delay_ms: 1000
//! ```
//!
//! A missing file means defaults. The Airtable key is only ever taken from
//! the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use meridian_source::SourceConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeridianConfig {
    pub sources: SourceConfig,
    pub cache_dir: PathBuf,
    pub refresh_delay_ms: u64,
}

impl Default for MeridianConfig {
    fn default() -> Self {
        Self {
            sources: SourceConfig::default(),
            cache_dir: PathBuf::from(".meridian"),
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
        }
    }
}

impl MeridianConfig {
    /// Read `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = MeridianConfig::load(&dir.path().join("meridian.yaml")).unwrap();
        assert_eq!(config, MeridianConfig::default());
        assert_eq!(config.refresh_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn partial_yaml_overrides() {
        let yaml = "sources:\n  airtable:\n    timeout_secs: 5\n  preload: bundle.js\nrefresh_delay_ms: 250\n";
        let config = MeridianConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.sources.airtable.timeout_secs, 5);
        assert_eq!(config.sources.preload, Some(PathBuf::from("bundle.js")));
        assert_eq!(config.refresh_delay_ms, 250);
        assert_eq!(config.cache_dir, PathBuf::from(".meridian"));
    }

    #[test]
    fn invalid_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meridian.yaml");
        std::fs::write(&path, "refresh_delay_ms: [soon]\n").unwrap();
        let err = MeridianConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("meridian.yaml"));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(MeridianConfig::from_yaml("\n").unwrap(), MeridianConfig::default());
    }
}
