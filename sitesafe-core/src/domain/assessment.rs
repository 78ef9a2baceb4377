//! Risk assessment entities
//!
//! Field names follow the JSON schema requested from the model, so an
//! assessment serializes to exactly the shape the prompt asks for and the
//! parser deserializes straight into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derived risk level for tasks and findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "moderate" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Severity or probability of a single hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Position on a 1-4 scale, used for composite scores
    pub fn weight(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One identified hazard with its controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub hazard: String,
    pub severity: Severity,
    pub probability: Severity,
    /// Composite score, severity x probability on a 1-16 scale
    pub risk_score: f64,
    #[serde(default)]
    pub mitigations: Vec<String>,
    /// Referenced regulations or standards, e.g. "OSHA 1926.501"
    #[serde(default)]
    pub standards: Vec<String>,
}

impl Risk {
    /// Score implied by severity and probability
    pub fn composite_score(severity: Severity, probability: Severity) -> f64 {
        f64::from(severity.weight()) * f64::from(probability.weight())
    }
}

/// The assessment of record, persisted and returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risks: Vec<Risk>,
    pub recommendations: Vec<String>,
    /// Semantically a set; see [`RiskAssessment::push_ppe`]
    #[serde(rename = "requiredPPE")]
    pub required_ppe: Vec<String>,
    #[serde(default)]
    pub emergency_procedures: Vec<String>,
    #[serde(rename = "weatherConsiderations")]
    pub weather_impact: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RiskAssessment {
    /// Add a PPE item unless an identical item is already required.
    pub fn push_ppe(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.required_ppe.iter().any(|existing| existing == &item) {
            self.required_ppe.push(item);
        }
    }

    /// True when every list callers rely on has at least one entry
    pub fn is_complete(&self) -> bool {
        !self.risks.is_empty()
            && !self.recommendations.is_empty()
            && !self.required_ppe.is_empty()
            && !self.weather_impact.is_empty()
    }
}

/// Persisted assessment with its owning site and creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssessmentRecord {
    pub site_id: String,
    pub assessment: RiskAssessment,
    pub created_at: DateTime<Utc>,
}

impl StoredAssessmentRecord {
    pub fn new(site_id: impl Into<String>, assessment: RiskAssessment) -> Self {
        Self {
            site_id: site_id.into(),
            assessment,
            created_at: Utc::now(),
        }
    }
}
