use serde::Serialize;

use sitesafe_core::domain::RiskAssessment;

use super::errors::PipelineError;

/// Where the returned assessment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    /// Model assessment merged with enrichment
    Enriched,
    /// Model assessment only
    PrimaryOnly,
    /// Static fallback payload
    Fallback,
}

impl AssessmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentSource::Enriched => "enriched",
            AssessmentSource::PrimaryOnly => "primary_only",
            AssessmentSource::Fallback => "fallback",
        }
    }
}

/// Result of one pipeline run with every stage failure that was absorbed
#[derive(Debug)]
pub struct PipelineOutcome {
    pub assessment: RiskAssessment,
    pub source: AssessmentSource,
    pub stage_errors: Vec<PipelineError>,
}

impl PipelineOutcome {
    pub fn is_fallback(&self) -> bool {
        self.source == AssessmentSource::Fallback
    }
}
