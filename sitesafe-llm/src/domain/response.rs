//! Model client responses and fallback text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic safety checklist served whenever the model cannot answer.
///
/// This is plain prose on purpose: it is always usable as text, and it never
/// parses as an assessment.
pub const FALLBACK_CHECKLIST: &str = "\
General construction safety checklist:
1. Conduct a pre-task briefing covering the day's hazards and controls.
2. Verify fall protection (guardrails, harnesses, anchor points) before any work at height.
3. Inspect scaffolds, ladders and lifting gear before use and tag out defective equipment.
4. Keep exclusion zones around cranes, excavators and suspended loads.
5. Wear required PPE: hard hat, high-visibility vest, safety boots, gloves and eye protection.
6. Monitor weather conditions and stop lifting operations in high winds.
7. Provide water, shade and rest breaks during hot weather.
8. Keep walkways clear and separate public access from the work area.
9. Confirm emergency contacts, first aid kits and evacuation routes are in place.
10. Report near misses and unsafe conditions to the site supervisor immediately.";

/// Why the client answered with fallback text instead of a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No usable API key was configured
    Unconfigured,
    /// The prompt was empty or whitespace
    EmptyPrompt,
    /// Every attempt failed
    ExhaustedRetries,
    /// The provider returned something unusable (e.g. an empty completion)
    UnexpectedError,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::Unconfigured => "the AI service is not configured",
            FallbackReason::EmptyPrompt => "the request was empty",
            FallbackReason::ExhaustedRetries => {
                "the AI service could not be reached after several attempts"
            }
            FallbackReason::UnexpectedError => "the AI service returned an unexpected error",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text produced by the model client
///
/// `text` is always usable; `fallback` records why it did not come from the
/// model, for logging only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

impl ModelResponse {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback: None,
        }
    }

    /// Fixed checklist prefixed with the reason for falling back
    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            text: format!(
                "Unable to generate a tailored analysis because {}.\n\n{}",
                reason, FALLBACK_CHECKLIST
            ),
            fallback: Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
