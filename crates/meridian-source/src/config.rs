//! Provider selection.
//!
//! Chain order is fixed: Airtable (only when an API key is available), then
//! the CSV snapshot, then the bundled preload. The API key is never read
//! from configuration files, only from the environment variable named by
//! `api_key_env`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::airtable::{AirtableSettings, AirtableSource};
use crate::chain::SourceChain;
use crate::csv::CsvSource;
use crate::preload::PreloadSource;

pub const DEFAULT_API_KEY_ENV: &str = "MERIDIAN_AIRTABLE_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub airtable: AirtableSettings,
    pub api_key_env: String,
    pub preload: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            airtable: AirtableSettings::default(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            preload: None,
            csv: Some(PathBuf::from("data/interjust_snapshot.csv")),
        }
    }
}

impl SourceConfig {
    /// The API key from the environment, if set and non-empty.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    /// Assemble the provider chain.
    ///
    /// An Airtable client that cannot be built is logged and left out.
    pub fn build_chain(&self, api_key: Option<&str>) -> SourceChain {
        let mut chain = SourceChain::new();
        match api_key {
            Some(key) => match AirtableSource::new(&self.airtable, key) {
                Ok(source) => chain = chain.with(source),
                Err(e) => tracing::warn!(error = %e, "Airtable source disabled"),
            },
            None => tracing::info!(env = %self.api_key_env, "no API key, skipping Airtable"),
        }
        if let Some(path) = &self.csv {
            chain = chain.with(CsvSource::new(path));
        }
        if let Some(path) = &self.preload {
            chain = chain.with(PreloadSource::from_file(path));
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order_with_key() {
        let config = SourceConfig {
            preload: Some(PathBuf::from("preload.js")),
            ..SourceConfig::default()
        };
        assert_eq!(config.build_chain(Some("key")).names(), ["airtable", "csv", "preload"]);
    }

    #[test]
    fn airtable_skipped_without_key() {
        let config = SourceConfig::default();
        assert_eq!(config.build_chain(None).names(), ["csv"]);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SourceConfig = serde_json::from_value(serde_json::json!({
            "airtable": { "table_id": "tblOther" },
            "csv": null
        }))
        .unwrap();
        assert_eq!(config.airtable.table_id, "tblOther");
        assert_eq!(config.airtable.base_url, crate::airtable::DEFAULT_BASE_URL);
        assert_eq!(config.api_key_env, DEFAULT_API_KEY_ENV);
        assert!(config.csv.is_none());
    }
}
