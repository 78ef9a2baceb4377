//! Unit tests for strict model response parsing

use rstest::rstest;

use sitesafe_core::domain::{RiskLevel, Severity};
use sitesafe_llm::ResponseParser;
use sitesafe_llm::domain::LlmError;

use crate::common::ASSESSMENT_JSON;

#[test]
fn test_parses_fenced_assessment() {
    let content = format!("Here is the assessment:\n\n```json\n{ASSESSMENT_JSON}\n```\n");
    let assessment = ResponseParser::parse_assessment(&content).unwrap();

    assert_eq!(assessment.risks.len(), 1);
    assert_eq!(assessment.risks[0].severity, Severity::High);
    assert_eq!(assessment.required_ppe, vec!["Hard hat", "Full-body harness"]);
    assert!(assessment.is_complete());
}

#[test]
fn test_parses_bare_json() {
    let assessment = ResponseParser::parse_assessment(ASSESSMENT_JSON).unwrap();
    assert_eq!(
        assessment.summary.as_deref(),
        Some("Work at height dominates today's risk.")
    );
}

#[rstest]
#[case::prose("The site looks mostly safe, keep an eye on the crane.")]
#[case::json_inside_prose("Result: {\"risks\": []} hope this helps")]
#[case::truncated("```json\n{\"risks\": [{\"hazard\": \"falls\"\n```")]
#[case::wrong_shape("{\"risks\": \"many\"}")]
#[case::empty("")]
fn test_malformed_output_is_parse_error(#[case] content: &str) {
    let result = ResponseParser::parse_assessment(content);
    assert!(matches!(result, Err(LlmError::Parse(_))), "{content:?}");
}

#[test]
fn test_parses_report_analysis() {
    let content = r#"```json
{
    "primaryHazards": ["Unsecured ladder"],
    "secondaryHazards": ["Falling tools"],
    "immediateActions": ["Tie off the ladder"],
    "preventiveMeasures": ["Daily ladder inspections"],
    "followUps": ["Supervisor to confirm fix"],
    "riskLevel": "Moderate"
}
```"#;

    let analysis = ResponseParser::parse_report(content).unwrap();
    assert_eq!(analysis.primary_hazards, vec!["Unsecured ladder"]);
    assert_eq!(analysis.risk_level, Some(RiskLevel::Medium));
}
