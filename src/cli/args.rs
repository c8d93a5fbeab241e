//! Command line argument parsing for the sarissa-analyze CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// sarissa-analyze - Build analyze requests from parameters and bodies
#[derive(Parser, Debug, Clone)]
#[command(name = "sarissa-analyze")]
#[command(about = "Assemble Sarissa _analyze requests from query parameters and request bodies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sarissa Contributors")]
#[command(long_about = None)]
pub struct AnalyzeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SARISSA_ANALYZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AnalyzeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Assemble an analyze request and print it
    Build(BuildArgs),
}

/// Arguments for assembling a request
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// URL query string, e.g. "text=foo&filter=lowercase"
    #[arg(long, value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Index the request is scoped to (the {index} path segment)
    #[arg(short, long)]
    pub index: Option<String>,

    /// File holding the request body
    #[arg(short, long, value_name = "BODY_FILE", conflicts_with = "body_text")]
    pub body: Option<PathBuf>,

    /// Request body given inline
    #[arg(long, value_name = "BODY")]
    pub body_text: Option<String>,

    /// Declared media type of the body; sniffed when absent
    #[arg(long, value_name = "MEDIA_TYPE")]
    pub content_type: Option<String>,

    /// Reject deprecated field spellings in the body
    #[arg(long)]
    pub strict: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}
