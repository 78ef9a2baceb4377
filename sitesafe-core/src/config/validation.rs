//! Configuration validation module

use crate::config::{
    CollectorConfig, EnrichmentConfig, LlmConfig, LoggingConfig, RetryConfig, StorageConfig,
};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration and input validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("LLM configuration error: {message}")]
    Llm { message: String },

    #[error("Storage configuration error: {message}")]
    Storage { message: String },

    #[error("Enrichment configuration error: {message}")]
    Enrichment { message: String },

    #[error("Collector configuration error: {message}")]
    Collector { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("Invalid input: {message}")]
    Input { message: String },
}

impl ValidationError {
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn enrichment(message: impl Into<String>) -> Self {
        Self::Enrichment {
            message: message.into(),
        }
    }

    pub fn collector(message: impl Into<String>) -> Self {
        Self::Collector {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::llm(
                "retry.max_attempts must be greater than 0",
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(ValidationError::llm(format!(
                "retry.initial_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            )));
        }
        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.provider != "google_ai" {
            return Err(ValidationError::llm(format!(
                "unsupported provider: {} (expected \"google_ai\")",
                self.provider
            )));
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::llm(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::llm("model cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::llm("max_tokens must be greater than 0"));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm("timeout must be greater than 0 seconds"));
        }
        // A missing or short API key is not an error here: the model client
        // reports itself unconfigured and serves fallback responses instead.
        self.retry.validate()
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.database_url
            && !url.starts_with("postgres://")
            && !url.starts_with("postgresql://")
        {
            return Err(ValidationError::storage(
                "database_url must be a postgres:// or postgresql:// URL",
            ));
        }
        if self.max_connections == 0 {
            return Err(ValidationError::storage(
                "max_connections must be greater than 0",
            ));
        }
        if self.local_index_cap == 0 {
            return Err(ValidationError::storage(
                "local_index_cap must be greater than 0",
            ));
        }
        if self.read_limit == 0 {
            return Err(ValidationError::storage("read_limit must be greater than 0"));
        }
        Ok(())
    }
}

impl Validate for EnrichmentConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        match &self.endpoint {
            Some(endpoint) if is_http_url(endpoint) => {}
            Some(endpoint) => {
                return Err(ValidationError::enrichment(format!(
                    "endpoint must start with http:// or https://, got: {}",
                    endpoint
                )));
            }
            None => {
                return Err(ValidationError::enrichment(
                    "endpoint is required when enrichment is enabled",
                ));
            }
        }
        if self.timeout_seconds == Some(0) {
            return Err(ValidationError::enrichment(
                "timeout_seconds must be greater than 0 when set",
            ));
        }
        Ok(())
    }
}

impl Validate for CollectorConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::collector("data_dir cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "format must be \"json\" or \"pretty\", got: {}",
                other
            ))),
        }
    }
}
