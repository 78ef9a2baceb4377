//! Assessment orchestrator: the top-level pipeline state machine.
//!
//! ```text
//! COLLECT ──fail──► FALLBACK
//!    │
//! SCORE ► PROMPT ► MODEL_CALL ──fail──► FALLBACK
//!                      │
//!                    PARSE ──fail──► FALLBACK
//!                      │
//!              LOG_HISTORY (best effort)
//!                      │
//!                   ENRICH ──fail──► primary only ─┐
//!                      │                           │
//!                    MERGE ────────────────────────┤
//!                                                  ▼
//!                                  PERSIST (best effort) ► RETURN
//! ```
//!
//! Collection, model and parse failures end the run with the static fallback
//! assessment. Every other failure degrades in place. Callers never see an
//! error; the absorbed failures are returned in [`PipelineOutcome`].

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use sitesafe_core::application::{ProcessedSite, ScoringEngine};
use sitesafe_core::config::ValidationError;
use sitesafe_core::domain::{
    AnalysisHistoryEntry, AnalysisKind, ReportAnalysis, RiskAssessment, RiskLevel, SafetyReport,
    StoredAssessmentRecord,
};
use sitesafe_llm::domain::{LlmError, ModelResponse};
use sitesafe_llm::{PromptBuilder, ResilientModelClient, ResponseParser};

use super::fallback::{fallback_assessment, fallback_report_analysis};
use crate::domain::{
    AssessmentSource, DataCollector, EnrichmentError, EnrichmentRequest, EnrichmentResponse,
    EnrichmentService, HistoryError, HistorySink, PipelineError, PipelineOutcome, StoreError,
};
use crate::infrastructure::store::FallbackStore;

/// Sequences collection, scoring, model call, enrichment and persistence.
///
/// Collaborators are shared behind `Arc` so one orchestrator can serve
/// concurrent runs.
#[derive(Clone)]
pub struct AssessmentOrchestrator {
    collector: Arc<dyn DataCollector>,
    model: Arc<ResilientModelClient>,
    store: Arc<FallbackStore>,
    enrichment: Option<Arc<dyn EnrichmentService>>,
    history: Option<Arc<dyn HistorySink>>,
}

impl AssessmentOrchestrator {
    pub fn new(
        collector: Arc<dyn DataCollector>,
        model: Arc<ResilientModelClient>,
        store: Arc<FallbackStore>,
    ) -> Self {
        Self {
            collector,
            model,
            store,
            enrichment: None,
            history: None,
        }
    }

    pub fn with_enrichment(mut self, enrichment: Arc<dyn EnrichmentService>) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    pub fn with_history(mut self, history: Arc<dyn HistorySink>) -> Self {
        self.history = Some(history);
        self
    }

    // ── Public operations ────────────────────────────────────────────

    /// Produce an assessment for a site. Never fails.
    pub async fn generate_risk_assessment(&self, site_id: &str) -> RiskAssessment {
        self.run(site_id).await.assessment
    }

    /// Run the full pipeline and report every absorbed stage failure.
    pub async fn run(&self, site_id: &str) -> PipelineOutcome {
        let mut stage_errors = Vec::new();

        let (site, primary) = match self.primary_assessment(site_id).await {
            Ok(result) => result,
            Err(e) => {
                Self::log_stage_error(site_id, &e);
                stage_errors.push(e);
                warn!(site_id, "Returning fallback assessment");
                return PipelineOutcome {
                    assessment: fallback_assessment(),
                    source: AssessmentSource::Fallback,
                    stage_errors,
                };
            }
        };

        if let Err(e) = self
            .log_history(AnalysisKind::RiskAssessment, site_id, &primary, site_id)
            .await
        {
            Self::log_stage_error(site_id, &e);
            stage_errors.push(e);
        }

        let (assessment, source) = match self.enrich(&site).await {
            Some(Ok(enrichment)) => (Self::merge(primary, enrichment), AssessmentSource::Enriched),
            Some(Err(e)) => {
                let e = PipelineError::Enrichment(e);
                Self::log_stage_error(site_id, &e);
                stage_errors.push(e);
                (primary, AssessmentSource::PrimaryOnly)
            }
            None => (primary, AssessmentSource::PrimaryOnly),
        };

        let record = StoredAssessmentRecord::new(site.site_id.clone(), assessment.clone());
        for e in self.store.save(&record).await.into_errors() {
            let e = PipelineError::Store(e);
            Self::log_stage_error(site_id, &e);
            stage_errors.push(e);
        }

        info!(
            site_id,
            source = source.as_str(),
            risks = assessment.risks.len(),
            degraded_stages = stage_errors.len(),
            "Risk assessment completed"
        );

        PipelineOutcome {
            assessment,
            source,
            stage_errors,
        }
    }

    /// Recent assessments for a site, newest first. Never fails; may be empty.
    pub async fn get_recent_assessments(&self, site_id: &str) -> Vec<RiskAssessment> {
        if site_id.trim().is_empty() {
            warn!("Recent assessments requested for a blank site id");
            return Vec::new();
        }

        self.store
            .load_recent(site_id.trim())
            .await
            .into_iter()
            .map(|record| record.assessment)
            .collect()
    }

    /// Analyse a field safety report. Never fails; nothing is persisted.
    pub async fn analyze_safety_report(&self, report: &SafetyReport) -> ReportAnalysis {
        match self.try_analyze_report(report).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(
                    stage = e.stage(),
                    error = %e,
                    title = %report.title,
                    "Report analysis failed, returning fallback"
                );
                fallback_report_analysis()
            }
        }
    }

    /// Administrative reset of the remote store; the only fallible operation.
    pub async fn clear_all_assessments(&self) -> Result<u64, StoreError> {
        let deleted = self.store.clear_all().await?;
        info!(deleted, "All remote assessments cleared");
        Ok(deleted)
    }

    // ── Merge ────────────────────────────────────────────────────────

    /// Combine the primary assessment with enrichment output.
    ///
    /// Risks, recommendations and weather impacts are concatenated. PPE is a
    /// set: first occurrence wins, compared by exact string.
    pub fn merge(primary: RiskAssessment, enrichment: EnrichmentResponse) -> RiskAssessment {
        let mut merged = primary;
        merged.risks.extend(enrichment.additional_risks);
        merged
            .recommendations
            .extend(enrichment.additional_recommendations);
        merged
            .weather_impact
            .extend(enrichment.additional_weather_impacts);

        let ppe = std::mem::take(&mut merged.required_ppe);
        for item in ppe.into_iter().chain(enrichment.additional_ppe) {
            merged.push_ppe(item);
        }
        merged
    }

    // ── Stages ───────────────────────────────────────────────────────

    /// COLLECT through PARSE; any error here is terminal.
    async fn primary_assessment(
        &self,
        site_id: &str,
    ) -> Result<(ProcessedSite, RiskAssessment), PipelineError> {
        let site_id = site_id.trim();
        if site_id.is_empty() {
            return Err(ValidationError::input("site id is required").into());
        }

        let snapshot = self.collector.collect_site_data(site_id).await?;
        let site = ScoringEngine::process(&snapshot);
        info!(
            site_id,
            high_risk_tasks = site.tasks_at(RiskLevel::High).count(),
            weather_risks = site.weather_risks.len(),
            historical_risks = site.historical_risks.len(),
            "Site scored"
        );

        let prompt = PromptBuilder::build_assessment_prompt(&site);
        let response = self.model.generate(&prompt).await;
        let assessment = Self::parse_model_output(&response, ResponseParser::parse_assessment)?;

        if !assessment.is_complete() {
            return Err(PipelineError::Parse(LlmError::parse(
                "assessment is missing risks, recommendations, PPE or weather considerations",
            )));
        }

        Ok((site, assessment))
    }

    async fn try_analyze_report(
        &self,
        report: &SafetyReport,
    ) -> Result<ReportAnalysis, PipelineError> {
        report.validate()?;

        let prompt = PromptBuilder::build_report_prompt(report);
        let response = self.model.generate(&prompt).await;
        let analysis = Self::parse_model_output(&response, ResponseParser::parse_report)?;

        if let Err(e) = self
            .log_history(
                AnalysisKind::ReportAnalysis,
                &report.title,
                &analysis,
                &report.location,
            )
            .await
        {
            warn!(stage = e.stage(), error = %e, "Failed to record report analysis");
        }

        Ok(analysis)
    }

    /// Parse model text. Fallback text is prose, so parsing it fails; the
    /// failure is attributed to the model when the client fell back.
    fn parse_model_output<T>(
        response: &ModelResponse,
        parse: impl Fn(&str) -> Result<T, LlmError>,
    ) -> Result<T, PipelineError> {
        parse(&response.text).map_err(|e| match response.fallback {
            Some(reason) => PipelineError::ModelUnavailable(reason),
            None => PipelineError::Parse(e),
        })
    }

    /// ENRICH; `None` when no enrichment service is wired.
    async fn enrich(
        &self,
        site: &ProcessedSite,
    ) -> Option<Result<EnrichmentResponse, EnrichmentError>> {
        let service = self.enrichment.as_ref()?;

        let high_risk_tasks: Vec<&str> = site
            .tasks_at(RiskLevel::High)
            .map(|t| t.task.id.as_str())
            .collect();

        let request = EnrichmentRequest {
            location: site.location.name.clone(),
            construction_type: site.location.classification.clone(),
            current_activities: site
                .tasks
                .iter()
                .filter(|t| t.task.status.is_active())
                .map(|t| format!("{}: {}", t.task.task_type, t.task.description))
                .collect(),
            safety_data: json!({
                "weather": site.current_weather,
                "weatherRisks": site.weather_risks,
                "historicalRisks": site.historical_risks,
                "highRiskTasks": high_risk_tasks,
            }),
        };

        Some(match service.enrich(request).await {
            Ok(response) if response.error => Err(EnrichmentError::Reported(
                response
                    .message
                    .unwrap_or_else(|| "no message".to_string()),
            )),
            other => other,
        })
    }

    async fn log_history<T: serde::Serialize>(
        &self,
        kind: AnalysisKind,
        query: &str,
        result: &T,
        context: &str,
    ) -> Result<(), PipelineError> {
        let Some(history) = self.history.as_ref() else {
            return Ok(());
        };

        let response = serde_json::to_string(result)
            .map_err(|e| PipelineError::History(HistoryError::Write(e.to_string())))?;
        let entry = AnalysisHistoryEntry::new(kind, query, response)
            .with_metadata(json!({ "context": context }));
        history.record(entry).await?;
        Ok(())
    }

    fn log_stage_error(site_id: &str, error: &PipelineError) {
        warn!(site_id, stage = error.stage(), error = %error, "Pipeline stage failed");
    }
}
