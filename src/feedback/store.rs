use anyhow::Result;

use super::model::FeedbackRecord;

/// Persists feedback records. One call writes one record atomically.
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn put(&self, record: &FeedbackRecord) -> Result<()>;
}
