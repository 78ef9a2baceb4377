pub mod error;
pub mod history;
pub mod messages;
pub mod provider;
pub mod response;

pub use error::LlmError;
pub use history::{HistoryError, HistorySink, TracingHistorySink};
pub use messages::{CompletionRequest, CompletionResponse, Message, Role, StopReason, Usage};
pub use provider::LlmProvider;
pub use response::{FALLBACK_CHECKLIST, FallbackReason, ModelResponse};
