//! # meridian-service — Statistics Pipeline
//!
//! Ties acquisition, computation and caching together behind one explicit
//! context object, [`StatsService`]. Consumers subscribe to a
//! `tokio::sync::watch` channel of [`PublishedStats`] and re-render on each
//! change.
//!
//! Configuration is read from YAML ([`MeridianConfig`]).

pub mod config;
pub mod error;
pub mod service;

pub use config::{MeridianConfig, DEFAULT_REFRESH_DELAY_MS};
pub use error::{ConfigError, ServiceError};
pub use service::{PublishedStats, RefreshOutcome, StatsOrigin, StatsService};
