//! Orchestrator application layer

pub mod fallback;
pub mod orchestrator;

pub use fallback::{fallback_assessment, fallback_report_analysis};
pub use orchestrator::AssessmentOrchestrator;
