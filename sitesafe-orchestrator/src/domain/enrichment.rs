//! Wire types for the secondary (multi-agent) assessment service

use serde::{Deserialize, Serialize};

use sitesafe_core::domain::Risk;

/// Request body POSTed to the enrichment service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequest {
    pub location: String,
    pub construction_type: String,
    /// Descriptions of the active tasks
    pub current_activities: Vec<String>,
    /// Scoring findings, passed through as JSON
    pub safety_data: serde_json::Value,
}

/// Response from the enrichment service
///
/// The service signals failure in-band with `error: true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichmentResponse {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub additional_risks: Vec<Risk>,
    pub additional_recommendations: Vec<String>,
    #[serde(rename = "additionalPPE")]
    pub additional_ppe: Vec<String>,
    pub additional_weather_impacts: Vec<String>,
}
