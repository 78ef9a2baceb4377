//! Orchestrator infrastructure layer

pub mod collector;
pub mod enrichment;
pub mod history;
pub mod store;

pub use collector::JsonFileCollector;
pub use enrichment::HttpEnrichmentClient;
pub use history::PostgresHistorySink;
pub use store::{
    AssessmentStore, FallbackStore, FileKeyValueStore, KeyValueStore, LocalStore,
    MemoryKeyValueStore, PostgresAssessmentStore, SaveOutcome,
};
