//! Field descriptor types
//!
//! Semantic types understood by type-scoped rules and default formatting:
//! - string, text: plain text
//! - integer, float, decimal: numbers
//! - boolean
//! - date, datetime, time: formatted through `date_format` / `strftime_format`
//! - association: belongs_to / has_one / has_many / has_and_belongs_to_many / embeds
//! - virtual: a method on the model rather than a stored column
//!
//! Any other type name is kept verbatim so that rules naming it still parse;
//! such rules simply match fields of that type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Domain type of a model attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticType {
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Time,
    Association,
    Virtual,
    /// A type name this crate has no special handling for
    Other(String),
}

impl SemanticType {
    /// Returns the type name used in rules and CSS hooks
    pub fn as_str(&self) -> &str {
        match self {
            SemanticType::String => "string",
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::Decimal => "decimal",
            SemanticType::Boolean => "boolean",
            SemanticType::Date => "date",
            SemanticType::Datetime => "datetime",
            SemanticType::Time => "time",
            SemanticType::Association => "association",
            SemanticType::Virtual => "virtual",
            SemanticType::Other(name) => name,
        }
    }

    /// Whether values of this type are rendered through date formats
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SemanticType::Date | SemanticType::Datetime | SemanticType::Time
        )
    }
}

impl From<&str> for SemanticType {
    fn from(name: &str) -> Self {
        match name {
            "string" => SemanticType::String,
            "text" => SemanticType::Text,
            "integer" => SemanticType::Integer,
            "float" => SemanticType::Float,
            "decimal" => SemanticType::Decimal,
            "boolean" => SemanticType::Boolean,
            "date" => SemanticType::Date,
            "datetime" | "timestamp" => SemanticType::Datetime,
            "time" => SemanticType::Time,
            "association" => SemanticType::Association,
            "virtual" => SemanticType::Virtual,
            other => SemanticType::Other(other.to_string()),
        }
    }
}

impl From<String> for SemanticType {
    fn from(name: String) -> Self {
        SemanticType::from(name.as_str())
    }
}

impl From<SemanticType> for String {
    fn from(semantic_type: SemanticType) -> Self {
        semantic_type.as_str().to_string()
    }
}

impl FromStr for SemanticType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SemanticType::from(s))
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cardinality of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    HasMany,
    HasAndBelongsToMany,
    Embeds,
}

impl AssociationKind {
    /// Whether the association points at many records
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            AssociationKind::HasMany | AssociationKind::HasAndBelongsToMany | AssociationKind::Embeds
        )
    }
}

/// Association details reported by model introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub kind: AssociationKind,
    /// Name of the associated model
    pub model: String,
}

/// One attribute as reported by the model provider, before labels and defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<Association>,
    /// Pixel width the model itself suggests for this column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl RawAttribute {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            association: None,
            width: None,
        }
    }

    pub fn association(name: impl Into<String>, kind: AssociationKind, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantic_type: SemanticType::Association,
            association: Some(Association {
                kind,
                model: model.into(),
            }),
            width: None,
        }
    }
}

/// Declarative record of one model attribute, immutable once introspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub semantic_type: SemanticType,
    pub association: Option<Association>,
    pub default_label: String,
    pub default_visible: bool,
    pub default_sortable: bool,
    pub default_width: Option<u32>,
}

impl FieldDescriptor {
    /// Build a descriptor with type-derived defaults.
    ///
    /// Collection associations and virtual fields are not sortable by default:
    /// neither maps onto a single orderable column.
    pub fn new(name: impl Into<String>, semantic_type: SemanticType, label: impl Into<String>) -> Self {
        let default_sortable = !matches!(semantic_type, SemanticType::Virtual);
        Self {
            name: name.into(),
            semantic_type,
            association: None,
            default_label: label.into(),
            default_visible: true,
            default_sortable,
            default_width: None,
        }
    }

    /// Build a descriptor from a raw attribute and its looked-up label.
    pub fn from_raw(raw: RawAttribute, label: impl Into<String>) -> Self {
        let mut descriptor = Self::new(raw.name, raw.semantic_type, label);
        if let Some(association) = &raw.association {
            if association.kind.is_collection() {
                descriptor.default_sortable = false;
            }
        }
        descriptor.association = raw.association;
        descriptor.default_width = raw.width;
        descriptor
    }
}

/// Current metadata of a field while rules are being applied.
///
/// Predicates see this view, so they observe the effects of earlier rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association: Option<Association>,
    pub label: String,
    pub visible: bool,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl FieldMeta {
    /// Returns the semantic type
    pub fn type_(&self) -> &SemanticType {
        &self.semantic_type
    }
}

impl From<&FieldDescriptor> for FieldMeta {
    fn from(descriptor: &FieldDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            semantic_type: descriptor.semantic_type.clone(),
            association: descriptor.association.clone(),
            label: descriptor.default_label.clone(),
            visible: descriptor.default_visible,
            sortable: descriptor.default_sortable,
            width: descriptor.default_width,
        }
    }
}
