//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub enrichment: EnrichmentConfig,
    pub collector: CollectorConfig,
    pub logging: LoggingConfig,
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active provider; only "google_ai" is implemented
    pub provider: String,
    /// API key (can also use the GOOGLE_AI_KEY env var)
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Model used for assessments and report analysis
    pub model: String,
    /// Temperature for generation (0.0 to 2.0)
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Retry schedule for model calls
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "google_ai".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            timeout_seconds: 60,
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration (serializable version)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first call
    pub max_attempts: u32,
    /// Delay before the second attempt (in milliseconds); doubles afterwards
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay (in milliseconds)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

/// How the local fallback store evicts index entries once the cap is reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Drop the oldest-inserted pointer, regardless of record timestamps
    #[default]
    InsertionOrder,
    /// Keep the index sorted by record timestamp and drop the oldest record
    OldestTimestamp,
}

/// Persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// PostgreSQL URL for the remote store; local-only when unset
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_seconds: u64,
    /// JSON file backing the local store; in-memory when unset
    pub local_path: Option<PathBuf>,
    /// Pointers kept per site in the local index
    pub local_index_cap: usize,
    /// Records returned by recent-assessment reads
    pub read_limit: usize,
    pub eviction: EvictionPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            connect_timeout_seconds: 5,
            local_path: None,
            local_index_cap: 10,
            read_limit: 10,
            eviction: EvictionPolicy::InsertionOrder,
        }
    }
}

/// Secondary (multi-agent) assessment service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    /// Full URL the enrichment request is POSTed to
    pub endpoint: Option<String>,
    /// Request timeout; the HTTP client default applies when unset
    pub timeout_seconds: Option<u64>,
}

/// Site data collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Directory holding one `<site_id>.json` snapshot per site
    pub data_dir: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/sites"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.llm.validate()?;
        self.storage.validate()?;
        self.enrichment.validate()?;
        self.collector.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_with_file(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_with_file(path: Option<&std::path::Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder.add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Environment variables last (highest priority)
        builder = builder.add_source(config::Environment::with_prefix("SITESAFE").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Common conventions for secrets
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            config.storage.database_url = Some(database_url);
        }
        if config.llm.api_key.is_none()
            && let Ok(key) = std::env::var("GOOGLE_AI_KEY")
        {
            config.llm.api_key = Some(key);
        }

        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
