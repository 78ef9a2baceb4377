//! SiteSafe LLM - model access for risk assessments
//!
//! - [`domain`] - provider seam, messages, errors and the fallback response
//! - [`infrastructure`] - Google AI provider, the resilient client, prompts
//!   and strict response parsing

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::ResponseParser;
pub use infrastructure::prompts::{self, PromptBuilder};
pub use infrastructure::providers::{
    BackoffPolicy, GoogleAiProvider, MIN_API_KEY_LEN, ResilientModelClient,
};
