//! Unit tests for prompt templates and PromptBuilder

use sitesafe_core::application::ScoringEngine;
use sitesafe_core::domain::{
    IncidentRecord, RiskLevel, SafetyReport, SiteLocation, SiteSnapshot, Task, TaskStatus,
    WeatherReading,
};
use sitesafe_llm::prompts::{ASSESSMENT_PROMPT, PromptBuilder, REPORT_ANALYSIS_PROMPT};

fn task(id: &str, task_type: &str, description: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        task_type: task_type.to_string(),
        description: description.to_string(),
        start: None,
        end: None,
        status,
        assigned_workers: vec![],
        equipment: vec![],
        hazards: vec![],
    }
}

fn incident(incident_type: &str, location: &str) -> IncidentRecord {
    IncidentRecord {
        incident_type: incident_type.to_string(),
        location: location.to_string(),
        date: None,
        description: String::new(),
    }
}

fn snapshot() -> SiteSnapshot {
    SiteSnapshot {
        site_id: "site-42".to_string(),
        location: SiteLocation {
            name: "Harbour Tower".to_string(),
            address: "1 Quay St".to_string(),
            classification: "high-rise commercial".to_string(),
        },
        current_weather: WeatherReading {
            temperature: 33.5,
            humidity: 50.0,
            wind_speed: 24.0,
            condition: "clear".to_string(),
            observed_at: None,
        },
        forecast: vec![],
        tasks: vec![
            task(
                "t1",
                "crane lift",
                "glass curtain wall panels over the street",
                TaskStatus::Pending,
            ),
            task("t2", "demobilise", "remove old hoarding", TaskStatus::Completed),
        ],
        incidents: vec![
            incident("slip", "level 3"),
            incident("slip", "level 3"),
            incident("dropped object", "gate 2"),
        ],
    }
}

#[test]
fn test_assessment_prompt_has_placeholders() {
    for placeholder in [
        "{site_name}",
        "{current_weather}",
        "{forecast}",
        "{tasks}",
        "{weather_risks}",
        "{historical_risks}",
    ] {
        assert!(ASSESSMENT_PROMPT.contains(placeholder), "missing {placeholder}");
    }
}

#[test]
fn test_prompts_request_json_schema() {
    assert!(ASSESSMENT_PROMPT.contains("requiredPPE"));
    assert!(ASSESSMENT_PROMPT.contains("weatherConsiderations"));
    assert!(ASSESSMENT_PROMPT.contains("emergencyProcedures"));
    assert!(REPORT_ANALYSIS_PROMPT.contains("primaryHazards"));
    assert!(REPORT_ANALYSIS_PROMPT.contains("immediateActions"));
}

#[test]
fn test_assessment_prompt_carries_site_data() {
    let processed = ScoringEngine::process(&snapshot());
    let prompt = PromptBuilder::build_assessment_prompt(&processed);

    assert!(prompt.contains("Harbour Tower"));
    assert!(prompt.contains("33.5°C"));
    assert!(prompt.contains("glass curtain wall panels"));
    assert!(prompt.contains("\"riskLevel\": \"high\""));
    assert!(prompt.contains("\"count\": 2"));
    assert!(!prompt.contains("{site_name}"));
    assert!(!prompt.contains("{tasks}"));
    assert!(!prompt.contains("{historical_risks}"));
}

#[test]
fn test_assessment_prompt_omits_finished_tasks() {
    let processed = ScoringEngine::process(&snapshot());
    let prompt = PromptBuilder::build_assessment_prompt(&processed);

    assert!(!prompt.contains("remove old hoarding"));
}

#[test]
fn test_assessment_prompt_marks_empty_sections() {
    let mut quiet = snapshot();
    quiet.current_weather.temperature = 18.0;
    quiet.current_weather.wind_speed = 5.0;
    quiet.tasks.clear();
    quiet.incidents.clear();

    let prompt = PromptBuilder::build_assessment_prompt(&ScoringEngine::process(&quiet));

    assert!(prompt.contains("None identified."));
    assert!(!prompt.contains("{weather_risks}"));
}

#[test]
fn test_report_prompt_fills_fields() {
    let report = SafetyReport {
        title: "Unsecured ladder".to_string(),
        description: "Ladder on level 4 not tied off".to_string(),
        location: "Level 4 east core".to_string(),
        category: "work at height".to_string(),
        reported_by: None,
        reported_at: None,
        severity: Some(RiskLevel::High),
    };

    let prompt = PromptBuilder::build_report_prompt(&report);

    assert!(prompt.contains("Unsecured ladder"));
    assert!(prompt.contains("Level 4 east core"));
    assert!(prompt.contains("high"));
    assert!(prompt.contains("anonymous"));
    assert!(!prompt.contains("{description}"));
}

#[test]
fn test_braces_in_site_data_are_copied_verbatim() {
    let mut site = snapshot();
    site.location.name = "{tasks}".to_string();
    site.tasks[0].description = "check {forecast} and {weather_risks} first".to_string();

    let prompt = PromptBuilder::build_assessment_prompt(&ScoringEngine::process(&site));

    assert!(prompt.contains("- **Name**: {tasks}\n"));
    assert!(prompt.contains("\"description\": \"check {forecast} and {weather_risks} first\""));
    assert!(prompt.contains("## Forecast\nNone identified."));
}

#[test]
fn test_braces_in_report_fields_are_copied_verbatim() {
    let report = SafetyReport {
        title: "{description}".to_string(),
        description: "Scaffold tag read {severity}".to_string(),
        location: "Gate 1".to_string(),
        category: String::new(),
        reported_by: Some("{title}".to_string()),
        reported_at: None,
        severity: None,
    };

    let prompt = PromptBuilder::build_report_prompt(&report);

    assert!(prompt.contains("- **Title**: {description}\n"));
    assert!(prompt.contains("- **Reported by**: {title}\n"));
    assert!(prompt.contains("Scaffold tag read {severity}"));
    assert!(prompt.contains("- **Reported severity**: not stated\n"));
    assert!(prompt.contains("\"primaryHazards\""));
}
