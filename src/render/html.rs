//! HTML list table
//!
//! Markup contract:
//! - `<style>` block with `#list th.<name>_field` / `#list td.<name>_field`
//!   width rules, only when some field sets a width
//! - wrapper `div` with `LayoutPlan::wrapper_class`
//! - `table#list` with `LayoutPlan::table_class`
//! - header cells: `header` (sortable only), `<type>_type`, `<name>_field`,
//!   then `LayoutPlan::frozen_classes`
//! - data cells: `<type>_type`, `<name>_field`, then the frozen classes
//!
//! Class names come from attribute names and are escaped like any text.

use std::fmt::Write;

use serde_json::Value;

use crate::errors::AdminResult;
use crate::layout::{LayoutField, LayoutPlan};
use crate::resolver::ResolvedField;

use super::cell::cell_value;
use super::Record;

/// Renders a planned list table
pub struct HtmlTable;

impl HtmlTable {
    pub fn render(plan: &LayoutPlan, records: &[Record]) -> AdminResult<String> {
        let mut html = String::new();

        let widths: Vec<(String, u32)> = plan
            .resolved_fields()
            .filter_map(|f| f.width().map(|w| (f.field_css_class(), w)))
            .collect();
        if !widths.is_empty() {
            html.push_str("<style>\n");
            for (class, width) in &widths {
                let _ = writeln!(
                    html,
                    "#list th.{class}, #list td.{class} {{ width: {w}px; min-width: {w}px; max-width: {w}px; }}",
                    class = css_selector(class),
                    w = width
                );
            }
            html.push_str("</style>\n");
        }

        let _ = writeln!(html, "<div class=\"{}\">", plan.wrapper_class());
        let _ = writeln!(html, "<table class=\"{}\" id=\"list\">", plan.table_class());

        html.push_str("<thead>\n<tr>\n");
        for (index, column) in plan.fields().iter().enumerate() {
            html.push_str(&header_cell(column, plan.frozen_classes(index)));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for record in records {
            html.push_str("<tr>\n");
            for (index, column) in plan.fields().iter().enumerate() {
                html.push_str(&data_cell(column, plan.frozen_classes(index), record)?);
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n</div>\n");
        Ok(html)
    }
}

fn header_cell(column: &LayoutField, frozen: &[&str]) -> String {
    match column.field() {
        None => format!(
            "<th class=\"{}\"><input class=\"toggle\" type=\"checkbox\"></th>\n",
            classes(&["checkbox"], frozen)
        ),
        Some(field) => {
            let mut base = Vec::with_capacity(3);
            if field.sortable() {
                base.push("header".to_string());
            }
            base.extend(field_classes(field));
            let base: Vec<&str> = base.iter().map(String::as_str).collect();
            format!(
                "<th class=\"{}\">{}</th>\n",
                classes(&base, frozen),
                escape(field.label())
            )
        }
    }
}

fn data_cell(column: &LayoutField, frozen: &[&str], record: &Record) -> AdminResult<String> {
    let cell = match column.field() {
        None => {
            let id = match record.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            format!(
                "<td class=\"{}\"><input name=\"bulk_ids[]\" type=\"checkbox\" value=\"{}\"></td>\n",
                classes(&["checkbox"], frozen),
                escape(&id)
            )
        }
        Some(field) => {
            let owned = field_classes(field);
            let base: Vec<&str> = owned.iter().map(String::as_str).collect();
            format!(
                "<td class=\"{}\">{}</td>\n",
                classes(&base, frozen),
                escape(&cell_value(field, record)?)
            )
        }
    };
    Ok(cell)
}

fn field_classes(field: &ResolvedField) -> [String; 2] {
    [field.type_css_class(), field.field_css_class()]
}

fn classes(base: &[&str], frozen: &[&str]) -> String {
    let all: Vec<&str> = base.iter().chain(frozen).copied().collect();
    escape(&all.join(" "))
}

/// Class name as a CSS selector. Characters outside `[A-Za-z0-9_-]` become
/// hex escapes, so nothing in it can close the `<style>` element.
fn css_selector(class: &str) -> String {
    let mut out = String::with_capacity(class.len());
    for c in class.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        } else {
            let _ = write!(out, "\\{:x} ", c as u32);
        }
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
