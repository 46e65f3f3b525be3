//! Model introspection boundary
//!
//! Field descriptors are built once per (model, attribute) pair from the
//! attributes a `ModelProvider` reports and the labels a `LabelProvider`
//! returns. Nothing downstream talks to the ORM directly.

mod catalog;
mod provider;
mod types;

pub use catalog::{ModelCatalog, ModelEntry};
pub use provider::{humanize, introspect, HumanizedLabels, LabelProvider, ModelProvider};
pub use types::{
    Association, AssociationKind, FieldDescriptor, FieldMeta, RawAttribute, SemanticType,
};
