//! Site snapshot entities
//!
//! A [`SiteSnapshot`] is the typed capture of location, weather, scheduled
//! tasks and incident history that one pipeline run works from. Snapshots are
//! validated once at the collector boundary; every later stage trusts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ValidationError;

/// Immutable capture of site state for a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    /// Site identifier the snapshot was collected for
    pub site_id: String,
    pub location: SiteLocation,
    pub current_weather: WeatherReading,
    /// Short-term forecast, earliest reading first
    #[serde(default)]
    pub forecast: Vec<WeatherReading>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub incidents: Vec<IncidentRecord>,
}

impl SiteSnapshot {
    /// Check the invariants later stages rely on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.site_id.trim().is_empty() {
            return Err(ValidationError::input("snapshot site id is empty"));
        }
        if self.location.name.trim().is_empty() {
            return Err(ValidationError::input(format!(
                "site {} has no location name",
                self.site_id
            )));
        }
        self.current_weather.validate()?;
        for reading in &self.forecast {
            reading.validate()?;
        }
        for task in &self.tasks {
            if task.id.trim().is_empty() {
                return Err(ValidationError::input(format!(
                    "site {} has a task without an id",
                    self.site_id
                )));
            }
            if let (Some(start), Some(end)) = (task.start, task.end)
                && end < start
            {
                return Err(ValidationError::input(format!(
                    "task {} ends before it starts",
                    task.id
                )));
            }
        }
        Ok(())
    }
}

/// Where the site is and what kind of construction happens there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLocation {
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Site classification, e.g. "high-rise commercial"
    #[serde(default)]
    pub classification: String,
}

/// A single weather observation or forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Miles per hour
    pub wind_speed: f64,
    /// Provider condition code, e.g. "clear", "rain"
    #[serde(default)]
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherReading {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.temperature.is_finite() || !self.wind_speed.is_finite() {
            return Err(ValidationError::input("weather reading is not a finite number"));
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(ValidationError::input(format!(
                "humidity {} is outside 0..=100",
                self.humidity
            )));
        }
        if self.wind_speed < 0.0 {
            return Err(ValidationError::input("wind speed is negative"));
        }
        Ok(())
    }
}

/// Scheduled site task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Free-text task type, e.g. "crane lift"
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_workers: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub hazards: Vec<String>,
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }
}

/// Past incident at or near the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    #[serde(rename = "type")]
    pub incident_type: String,
    pub location: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
}
