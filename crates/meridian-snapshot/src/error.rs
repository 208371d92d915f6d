//! Storage errors. Only writes surface these; reads degrade to defaults.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be moved into place.
    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    /// Snapshot JSON could not be encoded or decoded.
    #[error("snapshot serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage keys become file names, so they are restricted.
    #[error("invalid storage key {0:?}: use ASCII letters, digits, '_' or '-'")]
    InvalidKey(String),
}
