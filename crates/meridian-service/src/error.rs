//! Service and configuration errors.

use std::path::PathBuf;

use meridian_snapshot::SnapshotError;
use meridian_source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("snapshot cache: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
