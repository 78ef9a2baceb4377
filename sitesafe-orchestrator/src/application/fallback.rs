//! Static payloads returned when no real analysis can be produced

use sitesafe_core::domain::{ReportAnalysis, Risk, RiskAssessment, RiskLevel, Severity};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Generic site assessment; every list is non-empty
pub fn fallback_assessment() -> RiskAssessment {
    RiskAssessment {
        risks: vec![
            Risk {
                hazard: "Working at height: falls from scaffolds, ladders, roofs and open edges"
                    .to_string(),
                severity: Severity::High,
                probability: Severity::Medium,
                risk_score: Risk::composite_score(Severity::High, Severity::Medium),
                mitigations: strings(&[
                    "Install guardrails or edge protection on all open edges",
                    "Use personal fall arrest systems above 6 feet",
                    "Inspect scaffolds and ladders before each shift",
                ]),
                standards: strings(&["OSHA 1926.501", "OSHA 1926.451"]),
            },
            Risk {
                hazard: "Heavy material handling: crushing, struck-by and strain injuries during lifts"
                    .to_string(),
                severity: Severity::Medium,
                probability: Severity::Medium,
                risk_score: Risk::composite_score(Severity::Medium, Severity::Medium),
                mitigations: strings(&[
                    "Use mechanical lifting aids for loads over 50 lbs",
                    "Keep exclusion zones under suspended loads",
                    "Brief crews on safe lifting technique",
                ]),
                standards: strings(&["OSHA 1926.1400", "OSHA 1926.251"]),
            },
        ],
        recommendations: strings(&[
            "Hold a pre-task safety briefing before work starts",
            "Verify all workers hold current training for their tasks",
            "Walk the site to confirm housekeeping and access routes",
            "Review the emergency response plan with supervisors",
        ]),
        required_ppe: strings(&[
            "Hard hat",
            "Safety glasses",
            "High-visibility vest",
            "Steel-toed boots",
            "Work gloves",
        ]),
        emergency_procedures: strings(&[
            "Call emergency services and notify the site supervisor",
            "Keep first aid kits and trained first aiders on site",
        ]),
        weather_impact: strings(&[
            "Check the forecast before starting outdoor work",
            "Suspend crane and elevated work in high winds",
            "Schedule hydration breaks in hot conditions",
        ]),
        summary: Some(
            "A tailored assessment could not be generated; apply these baseline controls."
                .to_string(),
        ),
    }
}

/// Generic report analysis; every list is non-empty
pub fn fallback_report_analysis() -> ReportAnalysis {
    ReportAnalysis {
        primary_hazards: strings(&["Hazard described in the report requires manual review"]),
        secondary_hazards: strings(&["Related hazards in the surrounding work area"]),
        immediate_actions: strings(&[
            "Make the area safe and restrict access if needed",
            "Notify the site supervisor",
        ]),
        preventive_measures: strings(&[
            "Review the relevant task risk assessment",
            "Brief affected crews on the reported condition",
        ]),
        follow_ups: strings(&["Safety officer to review the report within 24 hours"]),
        risk_level: Some(RiskLevel::Medium),
        summary: Some("Automated analysis unavailable; manual review required.".to_string()),
    }
}
