//! Orchestrator domain layer

pub mod enrichment;
pub mod errors;
pub mod outcome;
pub mod services;

pub use enrichment::{EnrichmentRequest, EnrichmentResponse};
pub use errors::{CollectorError, EnrichmentError, PipelineError, StoreError};
pub use outcome::{AssessmentSource, PipelineOutcome};
pub use services::{DataCollector, EnrichmentService};

// History logging lives with the model client; re-exported for wiring
pub use sitesafe_llm::domain::{HistoryError, HistorySink, TracingHistorySink};
