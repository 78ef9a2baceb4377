//! Analysis history collaborator

use async_trait::async_trait;
use sitesafe_core::domain::AnalysisHistoryEntry;

/// Failure to record a history entry; always swallowed by callers
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history sink unavailable: {0}")]
    Unavailable(String),
    #[error("history write failed: {0}")]
    Write(String),
}

/// Fire-and-forget log of model interactions
#[async_trait]
pub trait HistorySink: Send + Sync {
    async fn record(&self, entry: AnalysisHistoryEntry) -> Result<(), HistoryError>;
}

/// Sink that only emits a debug event
pub struct TracingHistorySink;

#[async_trait]
impl HistorySink for TracingHistorySink {
    async fn record(&self, entry: AnalysisHistoryEntry) -> Result<(), HistoryError> {
        tracing::debug!(
            kind = entry.kind.as_str(),
            query_len = entry.query.len(),
            response_len = entry.response.len(),
            "Analysis history entry"
        );
        Ok(())
    }
}
