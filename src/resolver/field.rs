//! Resolved field configuration

use serde::Serialize;

use crate::model::{Association, FieldMeta, SemanticType};
use crate::rules::{DateFormat, ValueFormatter};

/// A field after every applicable rule has been merged in.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub(crate) meta: FieldMeta,
    pub(crate) order: usize,
    pub(crate) formatter: Option<ValueFormatter>,
    pub(crate) date_format: Option<DateFormat>,
    pub(crate) strftime_format: Option<String>,
}

impl ResolvedField {
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn label(&self) -> &str {
        &self.meta.label
    }

    pub fn semantic_type(&self) -> &SemanticType {
        &self.meta.semantic_type
    }

    pub fn association(&self) -> Option<&Association> {
        self.meta.association.as_ref()
    }

    pub fn visible(&self) -> bool {
        self.meta.visible
    }

    pub fn sortable(&self) -> bool {
        self.meta.sortable
    }

    /// Column width in pixels
    pub fn width(&self) -> Option<u32> {
        self.meta.width
    }

    /// Position among the visible fields; hidden fields are numbered after them
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn formatter(&self) -> Option<&ValueFormatter> {
        self.formatter.as_ref()
    }

    pub fn date_format(&self) -> Option<DateFormat> {
        self.date_format
    }

    pub fn strftime_format(&self) -> Option<&str> {
        self.strftime_format.as_deref()
    }

    /// strftime pattern used for temporal values
    pub fn date_pattern(&self) -> String {
        match &self.strftime_format {
            Some(pattern) => pattern.clone(),
            None => self
                .date_format
                .unwrap_or_default()
                .pattern(&self.meta.semantic_type)
                .to_string(),
        }
    }

    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    /// CSS hook naming the type, e.g. `string_type`
    pub fn type_css_class(&self) -> String {
        format!("{}_type", self.meta.semantic_type.as_str())
    }

    /// CSS hook naming the field, e.g. `name_field`
    pub fn field_css_class(&self) -> String {
        format!("{}_field", self.meta.name)
    }

    /// Serializable snapshot (closures omitted)
    pub fn to_view(&self) -> ResolvedFieldView {
        ResolvedFieldView {
            name: self.meta.name.clone(),
            semantic_type: self.meta.semantic_type.as_str().to_string(),
            label: self.meta.label.clone(),
            visible: self.meta.visible,
            sortable: self.meta.sortable,
            width: self.meta.width,
            order: self.order,
            has_formatter: self.formatter.is_some(),
            date_pattern: self
                .meta
                .semantic_type
                .is_temporal()
                .then(|| self.date_pattern()),
        }
    }
}

/// JSON form of a resolved field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFieldView {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: String,
    pub label: String,
    pub visible: bool,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    pub order: usize,
    pub has_formatter: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_pattern: Option<String>,
}
