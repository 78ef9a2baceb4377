//! Test doubles and fixtures for sitesafe-orchestrator

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use sitesafe_core::config::{LlmConfig, RetryConfig};
use sitesafe_core::domain::{
    AnalysisHistoryEntry, IncidentRecord, SiteLocation, SiteSnapshot, StoredAssessmentRecord,
    Task, TaskStatus, WeatherReading,
};
use sitesafe_llm::ResilientModelClient;
use sitesafe_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, StopReason, Usage,
};
use sitesafe_orchestrator::domain::{
    CollectorError, DataCollector, EnrichmentError, EnrichmentRequest, EnrichmentResponse,
    EnrichmentService, HistoryError, HistorySink, StoreError,
};
use sitesafe_orchestrator::infrastructure::{AssessmentStore, KeyValueStore};

pub const TEST_API_KEY: &str = "AIzaSy-test-0123456789abcdef";

// ── Model ────────────────────────────────────────────────────────────────────

/// Provider that answers every call with the same result
pub struct MockLlmProvider {
    result: Result<String, LlmError>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl MockLlmProvider {
    pub fn answering(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(request.user_text());

        self.result.clone().map(|text| CompletionResponse {
            id: "test-response-id".to_string(),
            model: "test-model".to_string(),
            text,
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
            created: None,
        })
    }
}

/// LLM config with a plausible key and millisecond backoff
pub fn llm_config() -> LlmConfig {
    LlmConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        retry: RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 1,
            max_delay_ms: 4,
        },
        ..Default::default()
    }
}

pub fn model_client(provider: Arc<MockLlmProvider>) -> Arc<ResilientModelClient> {
    Arc::new(ResilientModelClient::with_provider(provider, &llm_config()))
}

pub fn unconfigured_model() -> Arc<ResilientModelClient> {
    Arc::new(ResilientModelClient::from_config(&LlmConfig::default()))
}

// ── Collector ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDataCollector {
    sites: HashMap<String, SiteSnapshot>,
}

impl MockDataCollector {
    pub fn with_site(mut self, snapshot: SiteSnapshot) -> Self {
        self.sites.insert(snapshot.site_id.clone(), snapshot);
        self
    }
}

#[async_trait]
impl DataCollector for MockDataCollector {
    async fn collect_site_data(&self, site_id: &str) -> Result<SiteSnapshot, CollectorError> {
        self.sites
            .get(site_id)
            .cloned()
            .ok_or_else(|| CollectorError::NotFound(site_id.to_string()))
    }
}

// ── Enrichment ───────────────────────────────────────────────────────────────

pub struct MockEnrichment {
    result: Result<EnrichmentResponse, String>,
    pub requests: Mutex<Vec<EnrichmentRequest>>,
}

impl MockEnrichment {
    pub fn answering(response: EnrichmentResponse) -> Self {
        Self {
            result: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EnrichmentService for MockEnrichment {
    async fn enrich(
        &self,
        request: EnrichmentRequest,
    ) -> Result<EnrichmentResponse, EnrichmentError> {
        self.requests.lock().await.push(request);
        self.result
            .clone()
            .map_err(|message| EnrichmentError::Status { status: 503, body: message })
    }
}

// ── History ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingHistory {
    pub entries: Mutex<Vec<AnalysisHistoryEntry>>,
    pub fail: bool,
}

#[async_trait]
impl HistorySink for RecordingHistory {
    async fn record(&self, entry: AnalysisHistoryEntry) -> Result<(), HistoryError> {
        if self.fail {
            return Err(HistoryError::Unavailable("analysis_history missing".to_string()));
        }
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

// ── Stores ───────────────────────────────────────────────────────────────────

/// Remote store double with switchable failure modes
#[derive(Default)]
pub struct InMemoryRemoteStore {
    pub records: Mutex<Vec<StoredAssessmentRecord>>,
    pub table_missing: AtomicBool,
    pub probe_fails: AtomicBool,
    pub writes_fail: AtomicBool,
    pub reads_fail: AtomicBool,
}

impl InMemoryRemoteStore {
    pub fn without_table() -> Self {
        let store = Self::default();
        store.table_missing.store(true, Ordering::SeqCst);
        store
    }

    pub fn unreachable() -> Self {
        let store = Self::default();
        store.probe_fails.store(true, Ordering::SeqCst);
        store
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryRemoteStore {
    async fn is_available(&self) -> Result<bool, StoreError> {
        if self.probe_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(!self.table_missing.load(Ordering::SeqCst))
    }

    async fn save(&self, record: &StoredAssessmentRecord) -> Result<(), StoreError> {
        if self.writes_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write rejected".to_string()));
        }
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn load_recent(
        &self,
        site_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredAssessmentRecord>, StoreError> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read timed out".to_string()));
        }
        let mut records: Vec<_> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.site_id == site_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut records = self.records.lock().await;
        let count = records.len() as u64;
        records.clear();
        Ok(count)
    }
}

/// Key-value backend whose every operation fails
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Local("storage quota exceeded".to_string()))
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Local("storage quota exceeded".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Local("storage quota exceeded".to_string()))
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Local("storage quota exceeded".to_string()))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn task(id: &str, task_type: &str, description: &str) -> Task {
    Task {
        id: id.to_string(),
        task_type: task_type.to_string(),
        description: description.to_string(),
        start: None,
        end: None,
        status: TaskStatus::Pending,
        assigned_workers: vec!["crew-a".to_string()],
        equipment: vec![],
        hazards: vec![],
    }
}

pub fn site_snapshot(site_id: &str) -> SiteSnapshot {
    SiteSnapshot {
        site_id: site_id.to_string(),
        location: SiteLocation {
            name: "Harbour Tower".to_string(),
            address: "1 Quay St".to_string(),
            classification: "high-rise commercial".to_string(),
        },
        current_weather: WeatherReading {
            temperature: 35.0,
            humidity: 50.0,
            wind_speed: 10.0,
            condition: "clear".to_string(),
            observed_at: None,
        },
        forecast: vec![],
        tasks: vec![
            task("t1", "crane lift", "glass curtain wall panels over the street"),
            task("t2", "paperwork review", "permit checks"),
        ],
        incidents: vec![
            IncidentRecord {
                incident_type: "slip".to_string(),
                location: "level 3".to_string(),
                date: None,
                description: String::new(),
            },
            IncidentRecord {
                incident_type: "slip".to_string(),
                location: "level 3".to_string(),
                date: None,
                description: String::new(),
            },
        ],
    }
}

pub const ASSESSMENT_JSON: &str = r#"```json
{
    "risks": [
        {
            "hazard": "Falls from the curtain wall installation edge",
            "severity": "high",
            "probability": "medium",
            "riskScore": 6,
            "mitigations": ["Edge protection on all open floors"],
            "standards": ["OSHA 1926.501"]
        }
    ],
    "recommendations": ["Stop crane lifts if gusts exceed 20 mph"],
    "requiredPPE": ["hard hat", "gloves"],
    "emergencyProcedures": ["Suspended worker rescue plan"],
    "weatherConsiderations": ["Heat stress above 30°C"]
}
```"#;

pub const REPORT_JSON: &str = r#"{
    "primaryHazards": ["Unsecured ladder"],
    "secondaryHazards": ["Falling tools"],
    "immediateActions": ["Tie off the ladder"],
    "preventiveMeasures": ["Daily ladder inspections"],
    "followUps": ["Supervisor to confirm fix"],
    "riskLevel": "high"
}"#;
