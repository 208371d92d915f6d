//! # meridian-snapshot — Cached Statistics
//!
//! The last live calculation is kept in a key-value store so pages render
//! from it instantly while a refresh runs in the background.
//!
//! - [`KvStore`]: storage contract, with [`MemoryStore`] and [`FileStore`].
//! - [`SnapshotCache`]: load (never fails), save, update-if-changed, clear.
//! - [`has_changed`] / [`changed_fields`]: the headline-count comparator.
//! - [`default_stats`]: first-visit numbers.

pub mod cache;
pub mod compare;
pub mod defaults;
pub mod error;
pub mod store;

pub use cache::{SnapshotCache, SnapshotMeta, SnapshotSource, StoredSnapshot, UpdateOutcome, CACHE_KEY};
pub use compare::{changed_fields, has_changed, ComparedField, FieldChange};
pub use defaults::default_stats;
pub use error::SnapshotError;
pub use store::{FileStore, KvStore, MemoryStore};
