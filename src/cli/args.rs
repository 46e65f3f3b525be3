//! CLI argument definitions using clap
//!
//! Commands:
//! - adminlist resolve --models <path> --model <name> [--config <path>]
//! - adminlist layout  --models <path> --model <name> [--config <path>]
//! - adminlist render  --models <path> --model <name> --records <path> [--config <path>]
//!
//! `--log-level <trace|info|warn|error|fatal>` applies to every command.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::Severity;

/// adminlist - resolve, lay out and render admin list views
#[derive(Parser, Debug)]
#[command(name = "adminlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Lowest severity written to stderr
    #[arg(long, global = true, default_value = "info")]
    pub log_level: Severity,

    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Admin configuration file; defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model catalog file
    #[arg(long, default_value = "./models.json")]
    pub models: PathBuf,

    /// Model to list
    #[arg(long)]
    pub model: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved fields of a model as JSON
    Resolve {
        #[command(flatten)]
        target: Target,
    },

    /// Print the frozen-column layout of a model as JSON
    Layout {
        #[command(flatten)]
        target: Target,
    },

    /// Render the list table of a model as HTML
    Render {
        #[command(flatten)]
        target: Target,

        /// JSON array of records; read from stdin when omitted
        #[arg(long)]
        records: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
