use crate::storage::NewVisit;

/// 访问日志 Sink
///
/// Single append, no batching and no deduplication. Implementations must
/// accept a `shortcut_id` that no longer exists.
#[async_trait::async_trait]
pub trait VisitSink: Send + Sync {
    async fn record_visit(&self, visit: NewVisit) -> anyhow::Result<()>;
}
