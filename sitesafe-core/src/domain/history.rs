//! Analysis history entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of model interaction being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Raw prompt/response pair from the model client
    ModelGeneration,
    /// Parsed site risk assessment
    RiskAssessment,
    /// Parsed safety report analysis
    ReportAnalysis,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::ModelGeneration => "model_generation",
            AnalysisKind::RiskAssessment => "risk_assessment",
            AnalysisKind::ReportAnalysis => "report_analysis",
        }
    }
}

/// Best-effort log record of one model interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistoryEntry {
    pub query: String,
    pub response: String,
    pub kind: AnalysisKind,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AnalysisHistoryEntry {
    pub fn new(kind: AnalysisKind, query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            kind,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
