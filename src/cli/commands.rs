//! CLI command implementations
//!
//! Every command loads the model catalog and (optionally) the admin
//! configuration, builds the model's list view, then prints one artifact:
//! resolved fields, the layout plan, or the rendered table.

use std::path::Path;

use serde_json::{json, Value};

use crate::list::ListView;
use crate::model::ModelCatalog;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::registry::{AdminConfig, Registry};
use crate::render::Record;

use super::args::{Command, Target};
use super::errors::CliResult;
use super::io::{read_records, write_html, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    Logger::set_min_severity(cli.log_level);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Resolve { target } => resolve(&target),
        Command::Layout { target } => layout(&target),
        Command::Render { target, records } => render(&target, records.as_deref()),
    }
}

/// Print visible and hidden fields with the effective list settings
pub fn resolve(target: &Target) -> CliResult<()> {
    let view = build_view(target)?;
    write_json(&resolution_json(&view))
}

/// Print the frozen-column layout
pub fn layout(target: &Target) -> CliResult<()> {
    let view = build_view(target)?;
    write_json(&view.plan().to_view())
}

/// Print the first page of records as an HTML table
pub fn render(target: &Target, records: Option<&Path>) -> CliResult<()> {
    let view = build_view(target)?;
    let records: Vec<Record> = read_records(records)?;
    let html = view.render(records)?;
    write_html(&html)
}

fn build_view(target: &Target) -> CliResult<ListView> {
    let registry = load_registry(target.config.as_deref())?;
    let catalog = load_catalog(&target.models)?;
    Ok(ListView::build(&registry, &catalog, &catalog, &target.model)?)
}

/// Load the admin configuration, or an empty registry when no file is given
pub fn load_registry(path: Option<&Path>) -> CliResult<Registry> {
    match path {
        Some(path) => Ok(AdminConfig::load(path)?.into_registry()?),
        None => Ok(Registry::default()),
    }
}

/// Load the model catalog
pub fn load_catalog(path: &Path) -> CliResult<ModelCatalog> {
    let catalog = ModelCatalog::load(path)?;
    log_event_with_fields(
        Event::ModelsLoaded,
        &[("models", &catalog.len().to_string())],
    );
    Ok(catalog)
}

/// JSON body of the `resolve` command
pub fn resolution_json(view: &ListView) -> Value {
    let settings = view.settings();
    json!({
        "model": view.model(),
        "visible": view.plan().resolved_fields().map(|f| f.to_view()).collect::<Vec<_>>(),
        "hidden": view.hidden().iter().map(|f| f.to_view()).collect::<Vec<_>>(),
        "settings": {
            "sidescroll": settings.sidescroll.to_string(),
            "checkboxes": settings.checkboxes,
            "items_per_page": settings.items_per_page,
            "sort": settings.sort,
        }
    })
}
