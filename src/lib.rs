//! adminlist - list-view configuration for admin interfaces
//!
//! Resolves which fields of a model an admin list shows, with which labels,
//! widths and formats, then plans which columns stay frozen while the table
//! scrolls sideways.
//!
//! - `model`: introspected field descriptors
//! - `rules`: override rules and their effects
//! - `resolver`: merges descriptors with rules
//! - `registry`: global and per-model configuration (DSL and JSON)
//! - `layout`: sidescroll policy and frozen-column planning
//! - `render`: cell text and HTML table
//! - `list`: one model's list view end to end

pub mod cli;
pub mod errors;
pub mod layout;
pub mod list;
pub mod model;
pub mod observability;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod rules;

pub use errors::{AdminError, AdminResult};
pub use list::ListView;
