//! LLM Provider trait and related types
//!
//! Defines the seam between the model client and concrete backends, so the
//! retry and fallback logic can be exercised against mocks.

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Core trait for LLM providers
///
/// The trait is object-safe and used through `Arc<dyn LlmProvider>`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
