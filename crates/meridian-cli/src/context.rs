//! Shared command context: configuration with command-line overrides
//! applied, and the service built from it.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use meridian_service::{MeridianConfig, StatsService};
use meridian_stats::{classify_all, CountryRecord};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "meridian.yaml";

/// Values given on the command line win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cache_dir: Option<PathBuf>,
    pub preload: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Context {
    pub config: MeridianConfig,
}

impl Context {
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> anyhow::Result<Self> {
        let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let mut config = MeridianConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?;
        if let Some(dir) = overrides.cache_dir {
            config.cache_dir = dir;
        }
        if let Some(preload) = overrides.preload {
            config.sources.preload = Some(preload);
        }
        if let Some(csv) = overrides.csv {
            config.sources.csv = Some(csv);
        }
        Ok(Self { config })
    }

    pub fn service(&self) -> StatsService {
        StatsService::from_config(&self.config)
    }
}

/// Fetch through the service's shared records and classify them.
pub async fn classified_records(service: &StatsService) -> anyhow::Result<Vec<CountryRecord>> {
    let fetched = service.records().await.context("fetching records")?;
    tracing::info!(source = %fetched.source, records = fetched.records.len(), "classifying records");
    Ok(classify_all(&fetched.records))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
