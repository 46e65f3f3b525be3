//! CLI module for adminlist
//!
//! Provides command-line interface for:
//! - resolve: Resolved fields as JSON
//! - layout: Frozen-column layout as JSON
//! - render: List table as HTML

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, Target};
pub use commands::{
    layout, load_catalog, load_registry, render, resolution_json, resolve, run, run_command,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_records, read_records, write_html, write_json};
