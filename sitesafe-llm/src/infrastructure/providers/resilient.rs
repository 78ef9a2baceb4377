//! Resilient model client
//!
//! Wraps an [`LlmProvider`] with credential validation, bounded retry with
//! exponential backoff, and a deterministic fallback response. `generate`
//! never fails: when the model cannot answer, callers get the fallback
//! checklist text instead.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use sitesafe_core::config::{LlmConfig, RetryConfig};
use sitesafe_core::domain::{AnalysisHistoryEntry, AnalysisKind};

use super::google_ai::GoogleAiProvider;
use crate::domain::{
    CompletionRequest, CompletionResponse, FallbackReason, HistorySink, LlmError, LlmProvider,
    ModelResponse,
};

/// Shortest API key accepted as plausibly real
pub const MIN_API_KEY_LEN: usize = 20;

/// Stateless exponential backoff schedule
///
/// The delay depends only on the attempt number, so concurrent or
/// consecutive calls never share a growing delay.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl BackoffPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            initial_delay: config.initial_delay(),
            max_delay: config.max_delay(),
        }
    }

    /// Delay after failed attempt `attempt` (1-based): `initial * 2^(attempt-1)`
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Parameters sent with every completion request
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Check that a credential is present and of plausible length
pub fn is_plausible_api_key(key: Option<&str>) -> bool {
    key.map(str::trim)
        .is_some_and(|k| k.len() >= MIN_API_KEY_LEN)
}

/// Generative text client that always returns usable text
pub struct ResilientModelClient {
    /// `None` when the client is unconfigured
    provider: Option<Arc<dyn LlmProvider>>,
    settings: GenerationSettings,
    max_attempts: u32,
    backoff: BackoffPolicy,
    history: Option<Arc<dyn HistorySink>>,
}

impl ResilientModelClient {
    /// Build a client backed by Google AI from configuration
    pub fn from_config(config: &LlmConfig) -> Self {
        let provider = match config.api_key.as_deref() {
            Some(key) if is_plausible_api_key(Some(key)) => {
                match GoogleAiProvider::new(
                    key.trim(),
                    config.model.clone(),
                    Duration::from_secs(config.timeout_seconds),
                ) {
                    Ok(provider) => {
                        Some(Arc::new(provider.with_base_url(&config.base_url))
                            as Arc<dyn LlmProvider>)
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to initialise Google AI provider");
                        None
                    }
                }
            }
            _ => None,
        };

        Self::build(provider, config)
    }

    /// Build a client around an existing provider.
    ///
    /// The configured credential is still validated; without a plausible key
    /// the provider is never called.
    pub fn with_provider(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        let provider = is_plausible_api_key(config.api_key.as_deref()).then_some(provider);
        Self::build(provider, config)
    }

    fn build(provider: Option<Arc<dyn LlmProvider>>, config: &LlmConfig) -> Self {
        if provider.is_none() {
            warn!("AI model client is not configured; serving fallback responses");
        }

        Self {
            provider,
            settings: GenerationSettings::from(config),
            max_attempts: config.retry.max_attempts.max(1),
            backoff: BackoffPolicy::from_config(&config.retry),
            history: None,
        }
    }

    /// Log successful interactions to a history sink
    pub fn with_history(mut self, history: Arc<dyn HistorySink>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate text for a prompt, falling back to the static checklist
    pub async fn generate(&self, prompt: &str) -> ModelResponse {
        let Some(provider) = self.provider.as_ref() else {
            return ModelResponse::fallback(FallbackReason::Unconfigured);
        };

        if prompt.trim().is_empty() {
            warn!("Rejecting empty prompt");
            return ModelResponse::fallback(FallbackReason::EmptyPrompt);
        }

        let request = CompletionRequest::new()
            .with_user(prompt)
            .with_model(&self.settings.model)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        match self.complete_with_retry(provider.as_ref(), request).await {
            Ok(response) if response.text.trim().is_empty() => {
                warn!(model = %response.model, "Model returned an empty completion");
                ModelResponse::fallback(FallbackReason::UnexpectedError)
            }
            Ok(response) => {
                if response.is_truncated() {
                    warn!(model = %response.model, "Model output hit the token limit");
                }
                self.log_history(prompt, &response).await;
                ModelResponse::generated(response.text)
            }
            Err(e) if e.is_retryable() => {
                warn!(error = %e, attempts = self.max_attempts, "Model retries exhausted");
                ModelResponse::fallback(FallbackReason::ExhaustedRetries)
            }
            Err(e) => {
                warn!(error = %e, "Model call failed with a non-retryable error");
                ModelResponse::fallback(FallbackReason::UnexpectedError)
            }
        }
    }

    /// Execute with retry logic
    async fn complete_with_retry(
        &self,
        provider: &dyn LlmProvider,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let mut attempt = 1;

        loop {
            match provider.complete(request.clone()).await {
                Ok(response) => {
                    debug!(attempt, "Model call succeeded");
                    return Ok(response);
                }
                Err(e) if !e.is_retryable() || attempt >= self.max_attempts => return Err(e),
                Err(e) => {
                    // A provider hint wins when it is shorter than the cap
                    let delay = match e.retry_after() {
                        Some(hint) if hint < self.backoff.max_delay => hint,
                        _ => self.backoff.delay(attempt),
                    };
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Model call failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn log_history(&self, prompt: &str, response: &CompletionResponse) {
        let Some(history) = self.history.as_ref() else {
            return;
        };

        let entry = AnalysisHistoryEntry::new(AnalysisKind::ModelGeneration, prompt, &response.text)
            .with_metadata(serde_json::json!({
                "model": response.model,
                "promptTokens": response.usage.prompt_tokens,
                "completionTokens": response.usage.completion_tokens,
            }));

        match history.record(entry).await {
            Ok(()) => info!(model = %response.model, "Model interaction recorded"),
            Err(e) => warn!(error = %e, "Failed to record model interaction"),
        }
    }
}
