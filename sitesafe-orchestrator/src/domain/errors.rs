//! Per-stage error types

use sitesafe_core::config::ValidationError;
use sitesafe_llm::domain::{FallbackReason, HistoryError, LlmError};

/// Failure to produce a site snapshot
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("No site data found for {0}")]
    NotFound(String),

    #[error("Failed to read site data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed site data: {0}")]
    Malformed(String),

    #[error("Invalid site data: {0}")]
    Invalid(#[from] ValidationError),
}

/// Remote or local persistence failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Table {0} does not exist")]
    TableMissing(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Local store failure: {0}")]
    Local(String),
}

/// Secondary assessment service failure
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Enrichment request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Enrichment service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Enrichment service reported an error: {0}")]
    Reported(String),

    #[error("Enrichment service is not configured")]
    NotConfigured,
}

/// A pipeline stage failure, recorded on the outcome and logged
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Site data collection failed: {0}")]
    Collect(#[from] CollectorError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(FallbackReason),

    #[error("Model response rejected: {0}")]
    Parse(LlmError),

    #[error("Enrichment skipped: {0}")]
    Enrichment(#[from] EnrichmentError),

    #[error("History logging failed: {0}")]
    History(#[from] HistoryError),

    #[error("Persistence degraded: {0}")]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Stage name used in structured logs
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) | PipelineError::Collect(_) => "collect",
            PipelineError::ModelUnavailable(_) => "model_call",
            PipelineError::Parse(_) => "parse",
            PipelineError::Enrichment(_) => "enrich",
            PipelineError::History(_) => "log_history",
            PipelineError::Store(_) => "persist",
        }
    }

    /// Whether the failure ends the run with the fallback assessment
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineError::Validation(_)
                | PipelineError::Collect(_)
                | PipelineError::ModelUnavailable(_)
                | PipelineError::Parse(_)
        )
    }
}
