//! List rendering: cell text, default row order, HTML table

mod cell;
mod html;
mod sorter;

/// One list row as handed to the renderer
pub type Record = serde_json::Map<String, serde_json::Value>;

pub use cell::{cell_value, EMPTY_CELL};
pub use html::HtmlTable;
pub use sorter::RecordSorter;
