//! SiteSafe command-line entry point

use anyhow::{Context, bail};
use clap::Parser;
use serde::Serialize;

use sitesafe::cli::{Cli, Commands, OutputFormat};
use sitesafe::{Config, create_app, init_tracing};
use sitesafe_core::domain::{ReportAnalysis, RiskAssessment, SafetyReport};
use sitesafe_orchestrator::PipelineOutcome;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let config = Config::load_with_file(cli.config.as_deref())
        .context("Failed to load configuration. Check SITESAFE__* env vars")?;

    init_tracing(&config.logging).map_err(|e| anyhow::anyhow!(e))?;

    let app = create_app(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create application: {}", e))?;
    let orchestrator = &app.orchestrator;

    match cli.command {
        Commands::Assess { site_id } => {
            let outcome = orchestrator.run(&site_id).await;
            print_outcome(cli.format, &site_id, &outcome)?;
        }
        Commands::Recent { site_id } => {
            let recent = orchestrator.get_recent_assessments(&site_id).await;
            match cli.format {
                OutputFormat::Json => print_json(&recent)?,
                OutputFormat::Pretty => {
                    println!("{} stored assessment(s) for {}", recent.len(), site_id);
                    for (i, assessment) in recent.iter().enumerate() {
                        println!();
                        println!("#{}", i + 1);
                        print_assessment(assessment);
                    }
                }
            }
        }
        Commands::AnalyzeReport { file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read report {}", file.display()))?;
            let report: SafetyReport = serde_json::from_str(&raw)
                .with_context(|| format!("Report {} is not valid JSON", file.display()))?;
            let analysis = orchestrator.analyze_safety_report(&report).await;
            match cli.format {
                OutputFormat::Json => print_json(&analysis)?,
                OutputFormat::Pretty => print_analysis(&report, &analysis),
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every stored assessment without --yes");
            }
            let deleted = orchestrator
                .clear_all_assessments()
                .await
                .context("Failed to clear assessments")?;
            match cli.format {
                OutputFormat::Json => print_json(&serde_json::json!({ "deleted": deleted }))?,
                OutputFormat::Pretty => println!("Deleted {} assessment(s)", deleted),
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome(format: OutputFormat, site_id: &str, outcome: &PipelineOutcome) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let degraded: Vec<_> = outcome
                .stage_errors
                .iter()
                .map(|e| serde_json::json!({ "stage": e.stage(), "error": e.to_string() }))
                .collect();
            print_json(&serde_json::json!({
                "siteId": site_id,
                "source": outcome.source,
                "assessment": outcome.assessment,
                "degraded": degraded,
            }))
        }
        OutputFormat::Pretty => {
            println!("Risk assessment for {} ({})", site_id, outcome.source.as_str());
            println!();
            print_assessment(&outcome.assessment);
            if !outcome.stage_errors.is_empty() {
                println!();
                println!("Degraded stages:");
                for error in &outcome.stage_errors {
                    println!("  [{}] {}", error.stage(), error);
                }
            }
            Ok(())
        }
    }
}

fn print_assessment(assessment: &RiskAssessment) {
    if let Some(summary) = &assessment.summary {
        println!("{}", summary);
        println!();
    }
    println!("Risks:");
    for risk in &assessment.risks {
        println!(
            "  - {} (severity {}, probability {}, score {:.0})",
            risk.hazard, risk.severity, risk.probability, risk.risk_score
        );
        for mitigation in &risk.mitigations {
            println!("      * {}", mitigation);
        }
    }
    print_list("Recommendations", &assessment.recommendations);
    print_list("Required PPE", &assessment.required_ppe);
    print_list("Emergency procedures", &assessment.emergency_procedures);
    print_list("Weather considerations", &assessment.weather_impact);
}

fn print_analysis(report: &SafetyReport, analysis: &ReportAnalysis) {
    println!("Analysis of \"{}\"", report.title);
    if let Some(level) = analysis.risk_level {
        println!("Risk level: {}", level);
    }
    if let Some(summary) = &analysis.summary {
        println!("{}", summary);
    }
    print_list("Primary hazards", &analysis.primary_hazards);
    print_list("Secondary hazards", &analysis.secondary_hazards);
    print_list("Immediate actions", &analysis.immediate_actions);
    print_list("Preventive measures", &analysis.preventive_measures);
    print_list("Follow-ups", &analysis.follow_ups);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
}
