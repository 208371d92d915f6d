//! # meridian-source — Record Acquisition
//!
//! Providers that produce the raw country dataset as a
//! [`RecordSet`](meridian_stats::RecordSet):
//!
//! | Provider | Origin |
//! |---|---|
//! | [`AirtableSource`] | Airtable REST API, paginated, Bearer auth |
//! | [`CsvSource`] | CSV export on disk, parsed with polars |
//! | [`PreloadSource`] | Bundled JSON (file or in memory) |
//!
//! [`SourceChain`] tries providers in order; [`SharedRecords`] caches the
//! winning fetch so every consumer reads the same records.

pub mod airtable;
pub mod chain;
pub mod config;
pub mod csv;
pub mod error;
pub mod preload;
pub mod shared;
pub mod source;

pub use airtable::{AirtableSettings, AirtableSource};
pub use chain::{Fetched, SourceChain};
pub use config::{SourceConfig, DEFAULT_API_KEY_ENV};
pub use csv::{parse_csv, CsvSource};
pub use error::{ProviderFailure, SourceError};
pub use preload::{parse_preload, PreloadSource};
pub use shared::SharedRecords;
pub use source::RecordSource;
