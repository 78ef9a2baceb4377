//! Safety report entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::RiskLevel;
use crate::config::ValidationError;

/// Field safety report submitted by site staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Report category, e.g. "near miss", "unsafe condition"
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reported_by: Option<String>,
    #[serde(default)]
    pub reported_at: Option<DateTime<Utc>>,
    /// Severity as judged by the reporter
    #[serde(default)]
    pub severity: Option<RiskLevel>,
}

impl SafetyReport {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() && self.description.trim().is_empty() {
            return Err(ValidationError::input(
                "safety report needs a title or a description",
            ));
        }
        Ok(())
    }
}

/// Structured analysis of a [`SafetyReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysis {
    pub primary_hazards: Vec<String>,
    pub secondary_hazards: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub preventive_measures: Vec<String>,
    pub follow_ups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
