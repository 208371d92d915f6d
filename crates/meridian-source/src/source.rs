//! The provider contract.

use async_trait::async_trait;
use meridian_stats::RecordSet;

use crate::error::SourceError;

/// Something that can produce the country dataset.
///
/// An empty [`RecordSet`] is a valid answer; the chain treats it as "try the
/// next provider".
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Short provider name used in logs and chain results.
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<RecordSet, SourceError>;
}
