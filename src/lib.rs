//! SiteSafe - construction site risk assessment
//!
//! Wires the scoring engine, model client, stores and orchestrator from
//! [`Config`] into an [`AppHandle`]. The `sitesafe` binary drives it from the
//! command line.

pub mod app;
pub mod cli;

pub use app::{AppHandle, create_app};
pub use sitesafe_core::{Config, init_tracing};
