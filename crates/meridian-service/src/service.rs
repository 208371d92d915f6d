//! # Statistics Service
//!
//! Owns the provider chain, the shared record cache and the snapshot cache,
//! and publishes statistics to subscribers in two phases:
//!
//! 1. [`StatsService::load_cached`] publishes the persisted snapshot (or the
//!    first-visit defaults) without touching the network.
//! 2. [`StatsService::refresh_live`] fetches records, recomputes, and
//!    publishes only when a headline count differs from the published value.
//!    The store is written first, and only when its own blob differs.
//!
//! [`StatsService::schedule_refresh`] runs phase 2 on a background task
//! after a delay. Its failures are logged and leave phase-1 values in place.
//! At most one refresh runs at a time; a concurrent request is skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use meridian_core::Timestamp;
use meridian_snapshot::{
    changed_fields, FieldChange, FileStore, SnapshotCache, SnapshotSource, StoredSnapshot,
    UpdateOutcome,
};
use meridian_source::{Fetched, SharedRecords, SourceChain};
use meridian_stats::{compute, AggregateStats};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::MeridianConfig;
use crate::error::ServiceError;

/// Where published numbers came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOrigin {
    /// First-visit defaults; nothing cached yet.
    Default,
    /// A snapshot persisted by an earlier run.
    Cached,
    /// Computed in this process from the named provider.
    Live { provider: String },
}

impl std::fmt::Display for StatsOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Cached => f.write_str("cache"),
            Self::Live { provider } => write!(f, "live ({provider})"),
        }
    }
}

/// The value carried on the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedStats {
    pub stats: AggregateStats,
    pub origin: StatsOrigin,
    pub updated_at: Option<Timestamp>,
}

impl PublishedStats {
    fn defaults() -> Self {
        Self::from_snapshot(StoredSnapshot::defaults())
    }

    fn from_snapshot(snapshot: StoredSnapshot) -> Self {
        let origin = match snapshot.meta.source {
            SnapshotSource::Default => StatsOrigin::Default,
            SnapshotSource::LiveCalculation => StatsOrigin::Cached,
        };
        Self {
            stats: snapshot.stats,
            origin,
            updated_at: snapshot.meta.updated_at,
        }
    }
}

/// Result of one [`StatsService::refresh_live`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Another refresh was already running.
    Skipped,
    /// Fresh numbers match the published ones; nothing published.
    Unchanged { provider: String },
    /// Fresh numbers were persisted and published.
    Updated {
        provider: String,
        changes: Vec<FieldChange>,
    },
}

struct Inner {
    chain: SourceChain,
    cache: SnapshotCache,
    records: SharedRecords,
    tx: watch::Sender<Arc<PublishedStats>>,
    refreshing: AtomicBool,
}

/// Clears the in-flight flag when a refresh ends, however it ends.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Explicit service context. Clones share state.
#[derive(Clone)]
pub struct StatsService {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService")
            .field("chain", &self.inner.chain)
            .field("cache", &self.inner.cache)
            .field("refreshing", &self.is_refreshing())
            .finish()
    }
}

impl StatsService {
    /// A service that starts out publishing the defaults.
    pub fn new(chain: SourceChain, cache: SnapshotCache) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(PublishedStats::defaults()));
        Self {
            inner: Arc::new(Inner {
                chain,
                cache,
                records: SharedRecords::new(),
                tx,
                refreshing: AtomicBool::new(false),
            }),
        }
    }

    /// Wire a service from configuration: directory-backed cache and the
    /// configured provider chain, with the API key from the environment.
    pub fn from_config(config: &MeridianConfig) -> Self {
        let api_key = config.sources.api_key_from_env();
        let chain = config.sources.build_chain(api_key.as_deref());
        let cache = SnapshotCache::new(Arc::new(FileStore::new(&config.cache_dir)));
        tracing::debug!(sources = ?chain.names(), cache_dir = %config.cache_dir.display(), "service configured");
        Self::new(chain, cache)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<PublishedStats>> {
        self.inner.tx.subscribe()
    }

    /// The most recently published value.
    pub fn current(&self) -> Arc<PublishedStats> {
        Arc::clone(&self.inner.tx.borrow())
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.inner.cache
    }

    pub fn chain(&self) -> &SourceChain {
        &self.inner.chain
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.refreshing.load(Ordering::Acquire)
    }

    fn publish(&self, published: PublishedStats) -> Arc<PublishedStats> {
        let published = Arc::new(published);
        self.inner.tx.send_replace(Arc::clone(&published));
        published
    }

    /// Phase 1: publish the cached snapshot, or defaults.
    pub fn load_cached(&self) -> Arc<PublishedStats> {
        let published = PublishedStats::from_snapshot(self.inner.cache.load());
        tracing::info!(origin = %published.origin, total = published.stats.total_countries, "published cached statistics");
        self.publish(published)
    }

    /// Records shared by every consumer, fetched on first use.
    pub async fn records(&self) -> Result<Arc<Fetched>, ServiceError> {
        Ok(self.inner.records.get_or_fetch(&self.inner.chain).await?)
    }

    /// Phase 2: fetch, recompute, and publish if changed.
    pub async fn refresh_live(&self) -> Result<RefreshOutcome, ServiceError> {
        if self
            .inner
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("refresh already running, skipping");
            return Ok(RefreshOutcome::Skipped);
        }
        let _guard = RefreshGuard(&self.inner.refreshing);

        let fetched = self.inner.chain.fetch().await?;
        let fetched = self.inner.records.replace(fetched).await;
        let stats = compute(&fetched.records);
        let provider = fetched.source.clone();

        // Compare against what subscribers see, which may differ from the store.
        let changes = changed_fields(&self.current().stats, &stats);
        let updated_at = match self.inner.cache.update_if_changed(stats.clone())? {
            UpdateOutcome::Updated { snapshot, .. } => snapshot.meta.updated_at,
            UpdateOutcome::Unchanged => self.inner.cache.load().meta.updated_at,
        };

        if changes.is_empty() {
            tracing::info!(source = %provider, "live statistics match published values");
            return Ok(RefreshOutcome::Unchanged { provider });
        }

        tracing::info!(source = %provider, changed = changes.len(), "publishing live statistics");
        self.publish(PublishedStats {
            stats,
            origin: StatsOrigin::Live {
                provider: provider.clone(),
            },
            updated_at: updated_at.or_else(|| Some(Timestamp::now())),
        });
        Ok(RefreshOutcome::Updated { provider, changes })
    }

    /// Run [`refresh_live`](Self::refresh_live) on a background task after
    /// `delay`.
    pub fn schedule_refresh(&self, delay: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match service.refresh_live().await {
                Ok(outcome) => tracing::debug!(?outcome, "background refresh finished"),
                Err(e) => tracing::warn!(error = %e, "background refresh failed, keeping current statistics"),
            }
        })
    }

    /// Drop shared records and go back to publishing defaults.
    pub async fn reset(&self) {
        self.inner.records.reset().await;
        self.publish(PublishedStats::defaults());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_snapshot::{default_stats, MemoryStore};
    use meridian_source::PreloadSource;
    use meridian_stats::RecordSet;
    use serde_json::json;

    fn service_with(records: RecordSet) -> StatsService {
        let chain = SourceChain::new().with(PreloadSource::from_records(records));
        let cache = SnapshotCache::new(Arc::new(MemoryStore::new()));
        StatsService::new(chain, cache)
    }

    fn two_members() -> RecordSet {
        RecordSet::from_json_array(&[
            json!({ "Country": "Chile", "Status": "UN Member State", "Region": "South America",
                    "Does the country have at least one criminalized international crime?": "Yes" }),
            json!({ "Country": "Kenya", "Status": "UN Member State", "Region": "Africa" }),
        ])
    }

    #[test]
    fn starts_with_defaults() {
        let service = service_with(RecordSet::default());
        let current = service.current();
        assert_eq!(current.origin, StatsOrigin::Default);
        assert_eq!(current.stats, default_stats());
    }

    #[tokio::test]
    async fn refresh_publishes_and_persists() {
        let service = service_with(two_members());
        let mut rx = service.subscribe();
        service.load_cached();

        let outcome = service.refresh_live().await.unwrap();
        assert!(matches!(outcome, RefreshOutcome::Updated { ref provider, .. } if provider == "preload"));
        assert!(rx.has_changed().unwrap());
        let published = rx.borrow_and_update().clone();
        assert_eq!(published.stats.total_countries, 2);
        assert_eq!(published.origin, StatsOrigin::Live { provider: "preload".to_string() });

        let cached = service.cache().load();
        assert_eq!(cached.stats.total_countries, 2);

        let again = service.refresh_live().await.unwrap();
        assert_eq!(again, RefreshOutcome::Unchanged { provider: "preload".to_string() });
        assert!(!service.is_refreshing());
    }

    #[tokio::test]
    async fn load_cached_prefers_persisted_snapshot() {
        let service = service_with(two_members());
        service.refresh_live().await.unwrap();
        service.reset().await;
        assert_eq!(service.current().origin, StatsOrigin::Default);
        let published = service.load_cached();
        assert_eq!(published.origin, StatsOrigin::Cached);
        assert_eq!(published.stats.total_countries, 2);
        assert!(published.updated_at.is_some());
    }

    #[tokio::test]
    async fn reset_then_refresh_republishes_live() {
        let service = service_with(two_members());
        service.refresh_live().await.unwrap();
        service.reset().await;
        assert_eq!(service.current().stats, default_stats());

        let outcome = service.refresh_live().await.unwrap();
        assert!(matches!(outcome, RefreshOutcome::Updated { ref changes, .. } if !changes.is_empty()));
        let current = service.current();
        assert_eq!(current.stats.total_countries, 2);
        assert_eq!(current.origin, StatsOrigin::Live { provider: "preload".to_string() });
        assert!(current.updated_at.is_some());
    }

    #[tokio::test]
    async fn failed_refresh_clears_in_flight_flag() {
        let service = service_with(RecordSet::default());
        assert!(service.refresh_live().await.is_err());
        assert!(!service.is_refreshing());
    }

    #[tokio::test]
    async fn records_are_shared_with_refresh() {
        let service = service_with(two_members());
        let first = service.records().await.unwrap();
        service.refresh_live().await.unwrap();
        let second = service.records().await.unwrap();
        assert_eq!(first.records, second.records);
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
