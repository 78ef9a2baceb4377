//! Risk scoring engine
//!
//! Turns a raw [`SiteSnapshot`] into a [`ProcessedSite`]: every task gets a
//! keyword-derived [`RiskLevel`], and the current weather and incident history
//! are reduced to findings that feed the assessment prompt. Everything here is
//! pure and total; empty inputs simply produce empty finding lists.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{
    IncidentRecord, RiskLevel, SiteLocation, SiteSnapshot, Task, WeatherReading,
};

/// Temperature above which heat stress is flagged (degrees Celsius)
pub const HEAT_THRESHOLD_C: f64 = 30.0;
/// Wind speed above which overhead material handling is unsafe (mph)
pub const WIND_THRESHOLD_MPH: f64 = 20.0;
/// Humidity above which grip and visibility degrade (percent)
pub const HUMIDITY_THRESHOLD_PCT: f64 = 85.0;

const HEIGHT_KEYWORDS: &[&str] = &[
    "height",
    "roof",
    "scaffold",
    "ladder",
    "elevated",
    "curtain wall",
    "facade",
    "façade",
    "steel erection",
    "aerial",
    "mezzanine",
    "tower",
];

const LIFTING_KEYWORDS: &[&str] = &[
    "lift", "crane", "hoist", "rigging", "rigger", "overhead", "sling",
];

const PUBLIC_KEYWORDS: &[&str] = &[
    "public",
    "pedestrian",
    "street",
    "sidewalk",
    "footpath",
    "traffic",
    "road",
    "school",
    "neighbour",
    "neighbor",
];

const EQUIPMENT_KEYWORDS: &[&str] = &[
    "crane",
    "excavator",
    "bulldozer",
    "forklift",
    "heavy equipment",
    "machinery",
    "loader",
    "backhoe",
    "dump truck",
    "concrete pump",
    "pile driver",
    "telehandler",
];

/// Category of hazard a task description can signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignal {
    Height,
    Lifting,
    PublicExposure,
    HeavyEquipment,
}

impl RiskSignal {
    pub const ALL: [RiskSignal; 4] = [
        RiskSignal::Height,
        RiskSignal::Lifting,
        RiskSignal::PublicExposure,
        RiskSignal::HeavyEquipment,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            RiskSignal::Height => HEIGHT_KEYWORDS,
            RiskSignal::Lifting => LIFTING_KEYWORDS,
            RiskSignal::PublicExposure => PUBLIC_KEYWORDS,
            RiskSignal::HeavyEquipment => EQUIPMENT_KEYWORDS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSignal::Height => "work at height",
            RiskSignal::Lifting => "lifting operations",
            RiskSignal::PublicExposure => "public exposure",
            RiskSignal::HeavyEquipment => "heavy equipment",
        }
    }
}

/// Weather condition a finding refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherRiskKind {
    Heat,
    Wind,
    Humidity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRiskFinding {
    #[serde(rename = "type")]
    pub kind: WeatherRiskKind,
    pub severity: RiskLevel,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRiskFinding {
    pub incident_type: String,
    pub location: String,
    pub count: usize,
    pub severity: RiskLevel,
}

/// Task with its derived risk level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub risk_level: RiskLevel,
    pub signals: Vec<RiskSignal>,
}

/// Snapshot after scoring, ready for prompt building
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSite {
    pub site_id: String,
    pub location: SiteLocation,
    pub current_weather: WeatherReading,
    pub forecast: Vec<WeatherReading>,
    pub tasks: Vec<ScoredTask>,
    pub weather_risks: Vec<WeatherRiskFinding>,
    pub historical_risks: Vec<HistoricalRiskFinding>,
}

impl ProcessedSite {
    /// Tasks classified at the given level
    pub fn tasks_at(&self, level: RiskLevel) -> impl Iterator<Item = &ScoredTask> {
        self.tasks.iter().filter(move |t| t.risk_level == level)
    }
}

/// Pure scoring functions over site snapshots
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn process(snapshot: &SiteSnapshot) -> ProcessedSite {
        let tasks = snapshot
            .tasks
            .iter()
            .map(|task| {
                let signals = Self::task_signals(task);
                ScoredTask {
                    task: task.clone(),
                    risk_level: Self::level_for_signals(signals.len()),
                    signals,
                }
            })
            .collect();

        ProcessedSite {
            site_id: snapshot.site_id.clone(),
            location: snapshot.location.clone(),
            current_weather: snapshot.current_weather.clone(),
            forecast: snapshot.forecast.clone(),
            tasks,
            weather_risks: Self::weather_risks(&snapshot.current_weather),
            historical_risks: Self::historical_risks(&snapshot.incidents),
        }
    }

    /// Risk level from the task's type and description
    pub fn classify_task(task: &Task) -> RiskLevel {
        Self::level_for_signals(Self::task_signals(task).len())
    }

    /// Signal categories matched by the task's type and description
    pub fn task_signals(task: &Task) -> Vec<RiskSignal> {
        let text = format!("{} {}", task.task_type, task.description).to_lowercase();
        RiskSignal::ALL
            .into_iter()
            .filter(|signal| signal.keywords().iter().any(|kw| text.contains(kw)))
            .collect()
    }

    fn level_for_signals(count: usize) -> RiskLevel {
        match count {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn weather_risks(weather: &WeatherReading) -> Vec<WeatherRiskFinding> {
        let mut findings = Vec::new();

        if weather.temperature > HEAT_THRESHOLD_C {
            findings.push(WeatherRiskFinding {
                kind: WeatherRiskKind::Heat,
                severity: RiskLevel::High,
                description: format!(
                    "High temperature of {:.1}°C increases heat stress risk",
                    weather.temperature
                ),
            });
        }

        if weather.wind_speed > WIND_THRESHOLD_MPH {
            findings.push(WeatherRiskFinding {
                kind: WeatherRiskKind::Wind,
                severity: RiskLevel::High,
                description: format!(
                    "Wind speed of {:.1} mph is unsafe for crane and overhead material handling",
                    weather.wind_speed
                ),
            });
        }

        if weather.humidity > HUMIDITY_THRESHOLD_PCT {
            findings.push(WeatherRiskFinding {
                kind: WeatherRiskKind::Humidity,
                severity: RiskLevel::Medium,
                description: format!(
                    "Humidity of {:.0}% reduces grip and visibility",
                    weather.humidity
                ),
            });
        }

        findings
    }

    /// Repeated incidents grouped by type and location, most frequent first
    pub fn historical_risks(incidents: &[IncidentRecord]) -> Vec<HistoricalRiskFinding> {
        let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        for incident in incidents {
            *groups
                .entry((incident.incident_type.as_str(), incident.location.as_str()))
                .or_default() += 1;
        }

        let mut findings: Vec<HistoricalRiskFinding> = groups
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|((incident_type, location), count)| HistoricalRiskFinding {
                incident_type: incident_type.to_string(),
                location: location.to_string(),
                count,
                severity: if count > 3 {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                },
            })
            .collect();

        // BTreeMap order breaks ties, so the sort is deterministic
        findings.sort_by(|a, b| b.count.cmp(&a.count));
        findings
    }
}
