use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clearclause")]
#[command(about = "Privacy-first document risk analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "CLEARCLAUSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Mask PII locally and print the result (no network access)
    Redact {
        /// Extracted document text, or '-' for stdin
        input: PathBuf,

        /// Print masked text and summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entities that would be masked
    Entities {
        /// Extracted document text, or '-' for stdin
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Redact, send the masked text for risk analysis, and print the report
    Analyze {
        /// Extracted document text, or '-' for stdin
        input: PathBuf,

        /// Model to try, in order (repeatable; overrides config)
        #[arg(long = "model")]
        models: Vec<String>,

        /// Write the structured report as JSON
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Write the text report
        #[arg(long)]
        text_out: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },
}
