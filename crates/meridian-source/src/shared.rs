//! # Shared Record Cache
//!
//! One fetched record set serves every consumer (statistics, chart views,
//! placeholder values). The first caller runs the provider chain; callers
//! arriving while that fetch is in flight wait on the same lock and receive
//! its result instead of fetching again. A failed fetch caches nothing.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chain::{Fetched, SourceChain};
use crate::error::SourceError;

#[derive(Debug, Clone, Default)]
pub struct SharedRecords {
    slot: Arc<Mutex<Option<Arc<Fetched>>>>,
}

impl SharedRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached records, fetching through `chain` on first use.
    pub async fn get_or_fetch(&self, chain: &SourceChain) -> Result<Arc<Fetched>, SourceError> {
        let mut slot = self.slot.lock().await;
        if let Some(fetched) = slot.as_ref() {
            tracing::trace!(source = %fetched.source, "shared records hit");
            return Ok(Arc::clone(fetched));
        }
        let fetched = Arc::new(chain.fetch().await?);
        *slot = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    /// Swap in fresher records (a background refresh).
    pub async fn replace(&self, fetched: Fetched) -> Arc<Fetched> {
        let fetched = Arc::new(fetched);
        *self.slot.lock().await = Some(Arc::clone(&fetched));
        fetched
    }

    /// The cached records without fetching.
    pub async fn peek(&self) -> Option<Arc<Fetched>> {
        self.slot.lock().await.clone()
    }

    /// Drop the cached records; the next `get_or_fetch` fetches again.
    pub async fn reset(&self) {
        *self.slot.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RecordSource;
    use async_trait::async_trait;
    use meridian_stats::RecordSet;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RecordSource for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch(&self) -> Result<RecordSet, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(RecordSet::from_json_array(&[json!({ "Country": "Chile" })]))
        }
    }

    fn counting_chain() -> (Arc<AtomicUsize>, SourceChain) {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = SourceChain::new().with(Counting {
            calls: Arc::clone(&calls),
        });
        (calls, chain)
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let (calls, chain) = counting_chain();
        let shared = SharedRecords::new();
        let (a, b, c) = tokio::join!(
            shared.get_or_fetch(&chain),
            shared.get_or_fetch(&chain),
            shared.get_or_fetch(&chain),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(c.unwrap().source, "counting");
    }

    #[tokio::test]
    async fn reset_forces_refetch() {
        let (calls, chain) = counting_chain();
        let shared = SharedRecords::new();
        shared.get_or_fetch(&chain).await.unwrap();
        shared.reset().await;
        assert!(shared.peek().await.is_none());
        shared.get_or_fetch(&chain).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn replace_takes_precedence() {
        let (calls, chain) = counting_chain();
        let shared = SharedRecords::new();
        shared
            .replace(Fetched {
                source: "manual".to_string(),
                records: RecordSet::default(),
            })
            .await;
        let got = shared.get_or_fetch(&chain).await.unwrap();
        assert_eq!(got.source, "manual");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
