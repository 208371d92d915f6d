//! Errors raised while acquiring records.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// A payload did not have the expected shape.
    #[error("failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    /// The CSV snapshot could not be parsed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] polars::prelude::PolarsError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every provider in the chain failed or returned nothing.
    #[error("all record sources failed: {}", summarize(.0))]
    Exhausted(Vec<ProviderFailure>),

    /// A provider is missing required settings.
    #[error("{source_name} is not configured: {reason}")]
    NotConfigured { source_name: String, reason: String },
}

/// Why one provider in a chain produced no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub source: String,
    pub reason: String,
}

fn summarize(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return "no sources configured".to_string();
    }
    failures
        .iter()
        .map(|f| format!("{}: {}", f.source, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SourceError {
    pub(crate) fn decode(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}
