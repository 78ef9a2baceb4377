//! Strict response parsing for model outputs
//!
//! The model is asked for a single JSON object and may wrap it in a markdown
//! code fence. Parsing prefers a fenced block when one is present and
//! otherwise treats the whole text as JSON. Nothing else is attempted:
//! malformed output is a [`LlmError::Parse`] for the caller to handle.

use serde::de::DeserializeOwned;

use sitesafe_core::domain::{ReportAnalysis, RiskAssessment};

use crate::domain::LlmError;

/// Utilities for extracting and parsing JSON from model responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a risk assessment in the schema requested by the assessment prompt
    pub fn parse_assessment(content: &str) -> Result<RiskAssessment, LlmError> {
        Self::parse_json(content)
    }

    /// Parse a report analysis in the schema requested by the report prompt
    pub fn parse_report(content: &str) -> Result<ReportAnalysis, LlmError> {
        Self::parse_json(content)
    }

    /// Deserialize the fenced block if present, else the whole trimmed text.
    pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, LlmError> {
        let trimmed = content.trim();
        let candidate = Self::extract_fenced_json(trimmed)
            .or_else(|| Self::extract_any_fenced_code(trimmed))
            .unwrap_or_else(|| trimmed.to_string());

        serde_json::from_str::<T>(&candidate)
            .map_err(|e| LlmError::parse(format!("response does not match schema: {}", e)))
    }

    /// Extract a ```json fenced code block.
    pub fn extract_fenced_json(content: &str) -> Option<String> {
        Self::extract_fenced_block(content, Some("json"))
    }

    /// Extract any fenced code block.
    pub fn extract_any_fenced_code(content: &str) -> Option<String> {
        Self::extract_fenced_block(content, None)
    }

    /// Serialize a value the way the prompts ask the model to answer
    pub fn to_fenced_json<T: serde::Serialize>(value: &T) -> Result<String, LlmError> {
        Ok(format!("```json\n{}\n```", serde_json::to_string_pretty(value)?))
    }

    fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
        let fence = "```";
        let mut search = content;

        loop {
            let start = search.find(fence)?;
            let after_start = &search[start + fence.len()..];

            // The tag runs up to the first non-tag character, so "```json {...}```"
            // on one line is recognised as well as the multi-line form.
            let tag_len = after_start
                .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
                .unwrap_or(after_start.len());
            let lang_tag = &after_start[..tag_len];
            let rest = &after_start[tag_len..];

            if let Some(expected) = language
                && !lang_tag.eq_ignore_ascii_case(expected)
            {
                // Skip past this block's closing fence, if it has one
                search = match rest.find(fence) {
                    Some(end) => &rest[end + fence.len()..],
                    None => return None,
                };
                continue;
            }

            let end = rest.find(fence)?;
            return Some(rest[..end].trim().to_string());
        }
    }
}
