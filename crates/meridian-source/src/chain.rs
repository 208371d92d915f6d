//! # Provider Chain
//!
//! Tries each [`RecordSource`] in order and returns the first that yields a
//! non-empty record set. Failures and empty answers are collected and only
//! reported when every provider has been tried.

use std::sync::Arc;

use meridian_stats::RecordSet;

use crate::error::{ProviderFailure, SourceError};
use crate::source::RecordSource;

/// Records plus the name of the provider that supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub source: String,
    pub records: RecordSet,
}

#[derive(Clone, Default)]
pub struct SourceChain {
    sources: Vec<Arc<dyn RecordSource>>,
}

impl std::fmt::Debug for SourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.name()))
            .finish()
    }
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider; earlier providers take precedence.
    pub fn with(mut self, source: impl RecordSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn push(&mut self, source: Arc<dyn RecordSource>) {
        self.sources.push(source);
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub async fn fetch(&self) -> Result<Fetched, SourceError> {
        let mut failures = Vec::new();
        for source in &self.sources {
            match source.fetch().await {
                Ok(records) if !records.is_empty() => {
                    tracing::info!(source = source.name(), records = records.len(), "records loaded");
                    return Ok(Fetched {
                        source: source.name().to_string(),
                        records,
                    });
                }
                Ok(_) => {
                    tracing::warn!(source = source.name(), "source returned no records");
                    failures.push(ProviderFailure {
                        source: source.name().to_string(),
                        reason: "no records".to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "source failed, trying next");
                    failures.push(ProviderFailure {
                        source: source.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        Err(SourceError::Exhausted(failures))
    }
}
