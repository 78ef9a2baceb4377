use serde::Serialize;

use sitesafe_core::application::{ProcessedSite, RiskSignal};
use sitesafe_core::domain::{RiskLevel, SafetyReport};

pub const ASSESSMENT_PROMPT: &str = r#"You are an expert construction safety officer. Produce a site-specific risk assessment from the site data below.

## Site
- **Name**: {site_name}
- **Address**: {site_address}
- **Classification**: {site_classification}

## Current Weather
{current_weather}

## Forecast
{forecast}

## Scheduled Tasks
{tasks}

## Weather Risk Findings
{weather_risks}

## Historical Incident Patterns
{historical_risks}

## Your Task
Respond with a single JSON object and nothing else, using exactly this schema:

```json
{
    "risks": [
        {
            "hazard": "Description of the hazard and where it occurs",
            "severity": "low | medium | high | critical",
            "probability": "low | medium | high | critical",
            "riskScore": 9,
            "mitigations": ["Specific control measure"],
            "standards": ["Applicable regulation or standard, e.g. OSHA 1926.501"]
        }
    ],
    "recommendations": ["Actionable recommendation for the site manager"],
    "requiredPPE": ["Item of personal protective equipment"],
    "emergencyProcedures": ["Emergency procedure relevant to today's work"],
    "weatherConsiderations": ["How the weather affects today's tasks"],
    "summary": "Two or three sentence overview of the site's risk posture"
}
```

riskScore is severity x probability on a 1-16 scale (low=1, medium=2, high=3, critical=4).
Prioritise high-risk tasks and repeated incident patterns. Be specific; avoid generic advice.
"#;

pub const REPORT_ANALYSIS_PROMPT: &str = r#"You are an expert construction safety officer. Analyse the following field safety report.

## Report
- **Title**: {title}
- **Category**: {category}
- **Location**: {location}
- **Reported severity**: {severity}
- **Reported by**: {reported_by}

## Description
{description}

## Your Task
Respond with a single JSON object and nothing else, using exactly this schema:

```json
{
    "primaryHazards": ["Hazard directly described in the report"],
    "secondaryHazards": ["Related hazard that could follow from the situation"],
    "immediateActions": ["Action to take today"],
    "preventiveMeasures": ["Control that prevents recurrence"],
    "followUps": ["Follow-up task with an owner where possible"],
    "riskLevel": "low | medium | high",
    "summary": "One or two sentence summary"
}
```
"#;

const NONE_LISTED: &str = "None identified.";

/// Task view sent to the model
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskSummary<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    task_type: &'a str,
    description: &'a str,
    risk_level: RiskLevel,
    signals: Vec<&'static str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    equipment: &'a [String],
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build_assessment_prompt(site: &ProcessedSite) -> String {
        let weather = &site.current_weather;
        let current_weather = format!(
            "- Temperature: {:.1}°C\n- Humidity: {:.0}%\n- Wind speed: {:.1} mph\n- Condition: {}",
            weather.temperature,
            weather.humidity,
            weather.wind_speed,
            Self::or_unknown(&weather.condition)
        );

        let forecast = if site.forecast.is_empty() {
            NONE_LISTED.to_string()
        } else {
            site.forecast
                .iter()
                .map(|r| {
                    format!(
                        "- {:.1}°C, {:.0}% humidity, {:.1} mph wind, {}",
                        r.temperature,
                        r.humidity,
                        r.wind_speed,
                        Self::or_unknown(&r.condition)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let tasks: Vec<TaskSummary<'_>> = site
            .tasks
            .iter()
            .filter(|t| t.task.status.is_active())
            .map(|t| TaskSummary {
                id: &t.task.id,
                task_type: &t.task.task_type,
                description: &t.task.description,
                risk_level: t.risk_level,
                signals: t.signals.iter().map(RiskSignal::as_str).collect(),
                equipment: &t.task.equipment,
            })
            .collect();

        let tasks = Self::json_or_none(&tasks, tasks.is_empty());
        let weather_risks = Self::json_or_none(&site.weather_risks, site.weather_risks.is_empty());
        let historical_risks =
            Self::json_or_none(&site.historical_risks, site.historical_risks.is_empty());

        Self::fill(ASSESSMENT_PROMPT, |name| match name {
            "site_name" => Some(site.location.name.as_str()),
            "site_address" => Some(Self::or_unknown(&site.location.address)),
            "site_classification" => Some(Self::or_unknown(&site.location.classification)),
            "current_weather" => Some(current_weather.as_str()),
            "forecast" => Some(forecast.as_str()),
            "tasks" => Some(tasks.as_str()),
            "weather_risks" => Some(weather_risks.as_str()),
            "historical_risks" => Some(historical_risks.as_str()),
            _ => None,
        })
    }

    pub fn build_report_prompt(report: &SafetyReport) -> String {
        Self::fill(REPORT_ANALYSIS_PROMPT, |name| match name {
            "title" => Some(Self::or_unknown(&report.title)),
            "category" => Some(Self::or_unknown(&report.category)),
            "location" => Some(Self::or_unknown(&report.location)),
            "severity" => Some(report.severity.map(|s| s.as_str()).unwrap_or("not stated")),
            "reported_by" => Some(report.reported_by.as_deref().unwrap_or("anonymous")),
            "description" => Some(Self::or_unknown(&report.description)),
            _ => None,
        })
    }

    /// Substitute `{name}` placeholders in one pass over the template.
    ///
    /// Inserted values are never rescanned, so site data containing braces
    /// is copied verbatim. Unknown `{...}` spans (the JSON schema) are kept.
    fn fill<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
        let mut out = String::with_capacity(template.len() * 2);
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let placeholder = after
                .find('}')
                .and_then(|close| lookup(&after[..close]).map(|value| (value, close)));

            match placeholder {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn or_unknown(value: &str) -> &str {
        if value.trim().is_empty() {
            "unknown"
        } else {
            value
        }
    }

    fn json_or_none<T: Serialize + ?Sized>(value: &T, empty: bool) -> String {
        if empty {
            return NONE_LISTED.to_string();
        }
        serde_json::to_string_pretty(value).unwrap_or_else(|_| NONE_LISTED.to_string())
    }
}
