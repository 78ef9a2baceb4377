//! Unit tests for the retrying, always-answering model client

use std::sync::Arc;
use std::time::Duration;

use sitesafe_core::config::LlmConfig;
use sitesafe_llm::ResilientModelClient;
use sitesafe_llm::domain::{FALLBACK_CHECKLIST, FallbackReason, LlmError};

use crate::common::{RecordingHistory, MockLlmProvider, completion, configured_llm};

fn client(provider: Arc<MockLlmProvider>) -> ResilientModelClient {
    ResilientModelClient::with_provider(provider, &configured_llm())
}

#[tokio::test]
async fn test_success_returns_model_text() {
    let provider = Arc::new(MockLlmProvider::always(Ok(completion("All clear"))));
    let response = client(provider.clone()).generate("Assess site 42").await;

    assert_eq!(response.text, "All clear");
    assert!(!response.is_fallback());
    assert_eq!(provider.calls().await, 1);

    let requests = provider.captured_requests.lock().await;
    assert_eq!(requests[0].user_text(), "Assess site 42");
    assert_eq!(requests[0].model.as_deref(), Some("gemini-1.5-flash"));
}

#[tokio::test(start_paused = true)]
async fn test_retries_with_exponential_backoff() {
    let provider = Arc::new(MockLlmProvider::always(Err(LlmError::ServiceUnavailable(
        "overloaded".to_string(),
    ))));
    let started = tokio::time::Instant::now();

    let response = client(provider.clone()).generate("Assess site 42").await;

    assert_eq!(response.fallback, Some(FallbackReason::ExhaustedRetries));
    assert!(response.text.contains(FALLBACK_CHECKLIST));

    let times = provider.call_times.lock().await;
    assert_eq!(times.len(), 3);
    assert_eq!(times[1] - times[0], Duration::from_millis(1000));
    assert_eq!(times[2] - times[1], Duration::from_millis(2000));
    assert_eq!(times[2] - started, Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_transient_failure() {
    let provider = Arc::new(MockLlmProvider::new(vec![
        Err(LlmError::timeout(60)),
        Ok(completion("Recovered")),
    ]));

    let response = client(provider.clone()).generate("Assess site 42").await;

    assert_eq!(response.text, "Recovered");
    assert_eq!(provider.calls().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_hint_replaces_backoff_delay() {
    let provider = Arc::new(MockLlmProvider::new(vec![
        Err(LlmError::RateLimited {
            retry_after: Some(3),
            message: "quota exceeded".to_string(),
        }),
        Ok(completion("Recovered")),
    ]));

    let response = client(provider.clone()).generate("Assess site 42").await;

    assert_eq!(response.text, "Recovered");
    let times = provider.call_times.lock().await;
    assert_eq!(times[1] - times[0], Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_hint_beyond_cap_uses_backoff() {
    let provider = Arc::new(MockLlmProvider::new(vec![
        Err(LlmError::RateLimited {
            retry_after: Some(120),
            message: "quota exceeded".to_string(),
        }),
        Ok(completion("Recovered")),
    ]));

    let response = client(provider.clone()).generate("Assess site 42").await;

    assert_eq!(response.text, "Recovered");
    let times = provider.call_times.lock().await;
    assert_eq!(times[1] - times[0], Duration::from_millis(1000));
}

#[tokio::test]
async fn test_non_retryable_error_stops_immediately() {
    let provider = Arc::new(MockLlmProvider::always(Err(LlmError::auth("bad key"))));
    let response = client(provider.clone()).generate("Assess site 42").await;

    assert_eq!(response.fallback, Some(FallbackReason::UnexpectedError));
    assert_eq!(provider.calls().await, 1);
}

#[tokio::test]
async fn test_empty_prompt_never_calls_provider() {
    let provider = Arc::new(MockLlmProvider::always(Ok(completion("unused"))));
    let response = client(provider.clone()).generate("   \n").await;

    assert_eq!(response.fallback, Some(FallbackReason::EmptyPrompt));
    assert!(!response.text.is_empty());
    assert_eq!(provider.calls().await, 0);
}

#[tokio::test]
async fn test_short_key_leaves_client_unconfigured() {
    let provider = Arc::new(MockLlmProvider::always(Ok(completion("unused"))));
    let config = LlmConfig {
        api_key: Some("too-short".to_string()),
        ..Default::default()
    };
    let client = ResilientModelClient::with_provider(provider.clone(), &config);

    assert!(!client.is_configured());
    let response = client.generate("Assess site 42").await;
    assert_eq!(response.fallback, Some(FallbackReason::Unconfigured));
    assert!(response.text.contains("not configured"));
    assert_eq!(provider.calls().await, 0);
}

#[tokio::test]
async fn test_empty_completion_falls_back() {
    let provider = Arc::new(MockLlmProvider::always(Ok(completion("  "))));
    let response = client(provider).generate("Assess site 42").await;

    assert_eq!(response.fallback, Some(FallbackReason::UnexpectedError));
}

#[tokio::test]
async fn test_history_records_successful_generation() {
    let provider = Arc::new(MockLlmProvider::always(Ok(completion("All clear"))));
    let history = Arc::new(RecordingHistory::default());
    let client = client(provider).with_history(history.clone());

    client.generate("Assess site 42").await;

    let entries = history.entries.lock().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "Assess site 42");
    assert_eq!(entries[0].response, "All clear");
}

#[tokio::test]
async fn test_history_failure_does_not_affect_result() {
    let provider = Arc::new(MockLlmProvider::always(Ok(completion("All clear"))));
    let client = client(provider).with_history(Arc::new(RecordingHistory::failing()));

    let response = client.generate("Assess site 42").await;

    assert_eq!(response.text, "All clear");
    assert!(!response.is_fallback());
}
