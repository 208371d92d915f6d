//! # Snapshot Cache
//!
//! Persists the most recent live calculation so the next visit can show it
//! immediately. The stored blob is the [`AggregateStats`] JSON with an extra
//! `_meta` member:
//!
//! ```json
//! { "totalCountries": 193, ..., "_meta": { "updatedAt": "2026-01-02T03:04:05Z", "source": "live-calculation" } }
//! ```
//!
//! Reads never fail. A missing, unreadable or corrupt entry yields
//! [`default_stats`] tagged [`SnapshotSource::Default`].

use std::sync::Arc;

use meridian_core::Timestamp;
use meridian_stats::AggregateStats;
use serde::{Deserialize, Serialize};

use crate::compare::{changed_fields, FieldChange};
use crate::defaults::default_stats;
use crate::error::SnapshotError;
use crate::store::KvStore;

/// Storage key of the cached snapshot.
pub const CACHE_KEY: &str = "meridian_stats_cache";

/// Where a snapshot's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotSource {
    LiveCalculation,
    Default,
}

impl SnapshotSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LiveCalculation => "live-calculation",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub updated_at: Option<Timestamp>,
    pub source: SnapshotSource,
}

/// A snapshot together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSnapshot {
    #[serde(flatten)]
    pub stats: AggregateStats,
    #[serde(rename = "_meta")]
    pub meta: SnapshotMeta,
}

impl StoredSnapshot {
    /// The first-visit snapshot.
    pub fn defaults() -> Self {
        Self {
            stats: default_stats(),
            meta: SnapshotMeta {
                updated_at: None,
                source: SnapshotSource::Default,
            },
        }
    }

    /// A freshly calculated snapshot stamped with the current time.
    pub fn live(stats: AggregateStats) -> Self {
        Self {
            stats,
            meta: SnapshotMeta {
                updated_at: Some(Timestamp::now()),
                source: SnapshotSource::LiveCalculation,
            },
        }
    }

    pub fn is_default(&self) -> bool {
        self.meta.source == SnapshotSource::Default
    }
}

// Entries written without `_meta` are still accepted.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(flatten)]
    stats: AggregateStats,
    #[serde(rename = "_meta")]
    meta: Option<SnapshotMeta>,
}

/// Result of [`SnapshotCache::update_if_changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Compared counts are identical; nothing was written.
    Unchanged,
    /// The new snapshot replaced the cached one.
    Updated {
        snapshot: StoredSnapshot,
        changes: Vec<FieldChange>,
    },
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Snapshot persistence over a [`KvStore`].
#[derive(Clone)]
pub struct SnapshotCache {
    store: Arc<dyn KvStore>,
    key: String,
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache").field("key", &self.key).finish()
    }
}

impl SnapshotCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_key(store, CACHE_KEY)
    }

    pub fn with_key(store: Arc<dyn KvStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The cached snapshot, or the defaults.
    pub fn load(&self) -> StoredSnapshot {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredSnapshot::defaults(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "snapshot storage unreadable, using defaults");
                return StoredSnapshot::defaults();
            }
        };
        match serde_json::from_str::<StoredEntry>(&raw) {
            Ok(entry) => StoredSnapshot {
                stats: entry.stats,
                meta: entry.meta.unwrap_or(SnapshotMeta {
                    updated_at: None,
                    source: SnapshotSource::LiveCalculation,
                }),
            },
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cached snapshot is corrupt, using defaults");
                StoredSnapshot::defaults()
            }
        }
    }

    /// Write `stats` as a live calculation, stamped now.
    pub fn save(&self, stats: AggregateStats) -> Result<StoredSnapshot, SnapshotError> {
        let snapshot = StoredSnapshot::live(stats);
        let json = serde_json::to_string(&snapshot)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, bytes = json.len(), "saved snapshot");
        Ok(snapshot)
    }

    /// Replace the cached snapshot when any compared count differs from it.
    ///
    /// The comparison baseline is whatever [`load`](Self::load) returns, so
    /// an empty cache compares against the defaults.
    pub fn update_if_changed(&self, stats: AggregateStats) -> Result<UpdateOutcome, SnapshotError> {
        let current = self.load();
        let changes = changed_fields(&current.stats, &stats);
        if changes.is_empty() {
            tracing::debug!(key = %self.key, "snapshot unchanged");
            return Ok(UpdateOutcome::Unchanged);
        }
        for change in &changes {
            tracing::info!(field = %change.field, old = change.old, new = change.new, "statistic changed");
        }
        let snapshot = self.save(stats)?;
        Ok(UpdateOutcome::Updated { snapshot, changes })
    }

    /// Remove the cached entry; the next load returns defaults.
    pub fn clear(&self) -> Result<(), SnapshotError> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn cache() -> (MemoryStore, SnapshotCache) {
        let store = MemoryStore::new();
        let cache = SnapshotCache::new(Arc::new(store.clone()));
        (store, cache)
    }

    #[test]
    fn empty_store_loads_defaults() {
        let (_, cache) = cache();
        let snapshot = cache.load();
        assert!(snapshot.is_default());
        assert_eq!(snapshot.stats, default_stats());
        assert_eq!(snapshot.meta.updated_at, None);
    }

    #[test]
    fn corrupt_entry_loads_defaults() {
        let (store, cache) = cache();
        store.set(CACHE_KEY, "{not json").unwrap();
        assert!(cache.load().is_default());
        store.set(CACHE_KEY, r#"{"totalCountries":"many"}"#).unwrap();
        assert!(cache.load().is_default());
    }

    #[test]
    fn envelope_shape() {
        let (store, cache) = cache();
        cache.save(default_stats()).unwrap();
        let raw = store.get(CACHE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["totalCountries"], 193);
        assert_eq!(json["jurisdiction"]["absoluteUJ"], 97);
        assert_eq!(json["_meta"]["source"], "live-calculation");
        assert!(json["_meta"]["updatedAt"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn entry_without_meta_is_accepted() {
        let (store, cache) = cache();
        let mut stats = default_stats();
        stats.command_responsibility = 1;
        store
            .set(CACHE_KEY, &serde_json::to_string(&stats).unwrap())
            .unwrap();
        let loaded = cache.load();
        assert_eq!(loaded.stats, stats);
        assert_eq!(loaded.meta.source, SnapshotSource::LiveCalculation);
    }

    #[test]
    fn millisecond_timestamps_are_accepted() {
        let (store, cache) = cache();
        let mut json = serde_json::to_value(default_stats()).unwrap();
        json["_meta"] = serde_json::json!({
            "updatedAt": "2025-03-04T05:06:07.891Z",
            "source": "live-calculation"
        });
        store.set(CACHE_KEY, &json.to_string()).unwrap();
        let loaded = cache.load();
        assert_eq!(
            loaded.meta.updated_at.unwrap().to_iso8601(),
            "2025-03-04T05:06:07Z"
        );
    }

    #[test]
    fn update_only_on_change() {
        let (_, cache) = cache();
        let outcome = cache.update_if_changed(default_stats()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged);
        assert!(cache.load().is_default());

        let mut fresh = default_stats();
        fresh.practice.has_launched_case = 30;
        fresh.criminalization.genocide = 1;
        let outcome = cache.update_if_changed(fresh.clone()).unwrap();
        match outcome {
            UpdateOutcome::Updated { snapshot, changes } => {
                assert_eq!(snapshot.stats, fresh);
                assert_eq!(changes.len(), 1);
                assert_eq!(changes[0].old, 26);
                assert_eq!(changes[0].new, 30);
            }
            UpdateOutcome::Unchanged => panic!("expected an update"),
        }
        let loaded = cache.load();
        assert_eq!(loaded.stats, fresh);
        assert_eq!(loaded.meta.source, SnapshotSource::LiveCalculation);
        assert!(!cache.update_if_changed(fresh).unwrap().is_updated());
    }

    #[test]
    fn clear_restores_defaults() {
        let (store, cache) = cache();
        let mut fresh = default_stats();
        fresh.command_responsibility = 90;
        cache.save(fresh).unwrap();
        cache.clear().unwrap();
        assert!(store.is_empty());
        assert!(cache.load().is_default());
    }
}
