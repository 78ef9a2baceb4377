//! SiteSafe Orchestrator - risk assessment pipeline
//!
//! Sequences site data collection, scoring, the model call, enrichment and
//! persistence, and guarantees callers a usable result whatever fails.
//!
//! # Architecture
//!
//! ```text
//! sitesafe-orchestrator/
//! ├── domain/           # Collaborator traits, stage errors, outcomes
//! ├── application/      # AssessmentOrchestrator, fallback payloads
//! └── infrastructure/   # Stores, enrichment client, collector, history
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::AssessmentOrchestrator;
pub use domain::{AssessmentSource, PipelineError, PipelineOutcome, StoreError};
