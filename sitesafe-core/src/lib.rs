//! SiteSafe Core - Foundation crate for the SiteSafe risk assessment pipeline
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with file and environment variable support
//! - [`domain`] - Site snapshots, tasks, assessments and report entities
//! - [`application`] - The pure risk scoring engine
//! - [`logging`] - Structured logging with tracing
//!
//! # Configuration
//!
//! ```rust,ignore
//! use sitesafe_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `SITESAFE__` prefix with double underscore separators:
//!
//! ```bash
//! SITESAFE__LLM__MODEL=gemini-1.5-pro
//! SITESAFE__STORAGE__READ_LIMIT=10
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
