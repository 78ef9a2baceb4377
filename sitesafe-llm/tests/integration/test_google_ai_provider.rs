//! Integration tests for GoogleAiProvider using wiremock

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitesafe_core::config::{LlmConfig, RetryConfig};
use sitesafe_llm::domain::{CompletionRequest, FallbackReason, LlmError, LlmProvider};
use sitesafe_llm::{GoogleAiProvider, ResilientModelClient};

use crate::common::TEST_API_KEY;

const GENERATE_PATH: &str = "/models/test-model:generateContent";

fn create_provider(mock_server: &MockServer) -> GoogleAiProvider {
    GoogleAiProvider::new(TEST_API_KEY, "test-model", Duration::from_secs(10))
        .unwrap()
        .with_base_url(mock_server.uri())
}

fn create_test_request() -> CompletionRequest {
    CompletionRequest::new()
        .with_model("test-model")
        .with_user("Assess site 42")
        .with_max_tokens(100)
        .with_temperature(0.7)
}

fn success_body(text: &str, finish_reason: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": finish_reason
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 8,
            "totalTokenCount": 18
        }
    })
}

#[tokio::test]
async fn test_google_ai_provider_complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", TEST_API_KEY))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Assess site 42" }] }],
            "generationConfig": { "maxOutputTokens": 100 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("All clear", "STOP")))
        .mount(&mock_server)
        .await;

    let response = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap();

    assert_eq!(response.model, "test-model");
    assert_eq!(response.text, "All clear");
    assert_eq!(response.usage.total_tokens, 18);
    assert!(!response.is_truncated());
}

#[tokio::test]
async fn test_google_ai_provider_max_tokens_is_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body("Partial", "MAX_TOKENS")),
        )
        .mount(&mock_server)
        .await;

    let response = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap();

    assert!(response.is_truncated());
}

#[tokio::test]
async fn test_google_ai_provider_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "message": "Resource has been exhausted", "code": 429 }
        })))
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::RateLimited { .. }));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_google_ai_provider_rate_limit_carries_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "12")
                .set_body_string("quota exceeded"),
        )
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert_eq!(error.retry_after(), Some(Duration::from_secs(12)));
}

#[tokio::test]
async fn test_google_ai_provider_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid JSON payload"))
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::InvalidRequest(ref msg) if msg.contains("Invalid JSON")));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_google_ai_provider_rejected_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::Authentication(_)));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_google_ai_provider_safety_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("", "SAFETY")))
        .mount(&mock_server)
        .await;

    let error = create_provider(&mock_server)
        .complete(create_test_request())
        .await
        .unwrap_err();

    assert!(matches!(error, LlmError::ContentFiltered { .. }));
}

#[tokio::test]
async fn test_resilient_client_retries_server_errors_then_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = LlmConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: mock_server.uri(),
        model: "test-model".to_string(),
        retry: RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 10,
            max_delay_ms: 100,
        },
        ..Default::default()
    };
    let provider: Arc<dyn LlmProvider> = Arc::new(create_provider(&mock_server));
    let client = ResilientModelClient::with_provider(provider, &config);

    let response = client.generate("Assess site 42").await;

    assert_eq!(response.fallback, Some(FallbackReason::ExhaustedRetries));
}

#[tokio::test]
async fn test_resilient_client_from_config_reaches_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("All clear", "STOP")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = LlmConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        base_url: mock_server.uri(),
        model: "test-model".to_string(),
        ..Default::default()
    };
    let client = ResilientModelClient::from_config(&config);

    assert!(client.is_configured());
    assert_eq!(client.generate("Assess site 42").await.text, "All clear");
}
