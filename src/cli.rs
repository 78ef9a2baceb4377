//! Command-line interface

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// SiteSafe - construction site risk assessment
#[derive(Parser, Debug)]
#[command(
    name = "sitesafe",
    version,
    about = "Generate and review construction site risk assessments",
    long_about = "SiteSafe scores a site's tasks, weather and incident history, asks a \
                  generative model for a full safety assessment and stores the result.\n\n\
                  Every command except 'clear' always produces usable output, falling back \
                  to a generic assessment when the model or data sources are unavailable."
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Configuration file layered over config/default and config/local
    #[arg(long, global = true, env = "SITESAFE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the assessment pipeline for a site
    Assess {
        site_id: String,
    },

    /// Show recent stored assessments for a site
    Recent {
        site_id: String,
    },

    /// Analyse a safety report read from a JSON file
    AnalyzeReport {
        file: PathBuf,
    },

    /// Delete every assessment in the remote store
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}
