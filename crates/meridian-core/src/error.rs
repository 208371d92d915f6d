//! # Error Types
//!
//! The shared error type for parsing domain vocabulary. Classification and
//! aggregation never fail, so this stays small: it only covers explicit
//! parsing of user-supplied names (CLI arguments, config, cached blobs).

use thiserror::Error;

/// Top-level error type for domain vocabulary parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeridianError {
    /// A name did not match any variant of a closed enum.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// Which vocabulary was being parsed (e.g. "region").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// ISO 3166-1 alpha-3 code was malformed.
    #[error("invalid ISO 3166-1 alpha-3 code: {0:?}")]
    InvalidIsoCode(String),

    /// Timestamp failed to parse or was not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl MeridianError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
