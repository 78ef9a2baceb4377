//! Common test utilities and mock implementations

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use sitesafe_core::config::LlmConfig;
use sitesafe_core::domain::AnalysisHistoryEntry;
use sitesafe_llm::domain::{
    CompletionRequest, CompletionResponse, HistoryError, HistorySink, LlmError, LlmProvider,
    StopReason, Usage,
};

pub const TEST_API_KEY: &str = "AIzaSy-test-0123456789abcdef";

/// LLM config carrying a plausible key
pub fn configured_llm() -> LlmConfig {
    LlmConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        ..Default::default()
    }
}

/// Provider that replays a script of results, one per call
///
/// Once the script runs out the last entry repeats.
pub struct MockLlmProvider {
    script: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    last: Mutex<Option<Result<CompletionResponse, LlmError>>>,
    pub captured_requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub call_times: Arc<Mutex<Vec<Instant>>>,
}

impl MockLlmProvider {
    pub fn new(script: Vec<Result<CompletionResponse, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
            call_times: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(result: Result<CompletionResponse, LlmError>) -> Self {
        Self::new(vec![result])
    }

    pub async fn calls(&self) -> usize {
        self.call_times.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.captured_requests.lock().await.push(request);
        self.call_times.lock().await.push(Instant::now());

        let mut script = self.script.lock().await;
        let mut last = self.last.lock().await;
        match script.pop_front() {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(LlmError::Other("No response configured".to_string()))),
        }
    }
}

/// History sink that keeps entries in memory, or fails every write
#[derive(Default)]
pub struct RecordingHistory {
    pub entries: Mutex<Vec<AnalysisHistoryEntry>>,
    pub fail: bool,
}

impl RecordingHistory {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl HistorySink for RecordingHistory {
    async fn record(&self, entry: AnalysisHistoryEntry) -> Result<(), HistoryError> {
        if self.fail {
            return Err(HistoryError::Unavailable("history table missing".to_string()));
        }
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

/// Create a standard LLM response with given content
pub fn completion(content: &str) -> CompletionResponse {
    CompletionResponse {
        id: "test-response-id".to_string(),
        model: "test-model".to_string(),
        text: content.to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            prompt_tokens: 100,
            completion_tokens: 50,
            total_tokens: 150,
        },
        created: None,
    }
}

pub const ASSESSMENT_JSON: &str = r#"{
    "risks": [
        {
            "hazard": "Falls from the level 12 slab edge",
            "severity": "high",
            "probability": "medium",
            "riskScore": 6,
            "mitigations": ["Install edge protection before formwork strip"],
            "standards": ["OSHA 1926.501"]
        }
    ],
    "recommendations": ["Hold a toolbox talk on edge protection"],
    "requiredPPE": ["Hard hat", "Full-body harness"],
    "emergencyProcedures": ["Suspended worker rescue plan"],
    "weatherConsiderations": ["Wind gusts may affect crane lifts after 14:00"],
    "summary": "Work at height dominates today's risk."
}"#;
