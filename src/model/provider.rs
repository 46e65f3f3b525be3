//! Seams to the model-introspection and label-lookup collaborators

use crate::errors::AdminResult;

use super::types::{FieldDescriptor, RawAttribute};

/// Reports the attributes of a model in introspection order.
pub trait ModelProvider {
    /// Attributes of `model`, or `AdminError::UnknownModel`.
    fn attributes(&self, model: &str) -> AdminResult<Vec<RawAttribute>>;

    /// Names of every known model.
    fn model_names(&self) -> Vec<String>;
}

/// Looks up the human-readable label of a model attribute.
pub trait LabelProvider {
    fn label_for(&self, model: &str, field: &str) -> String;
}

/// Label provider that derives labels from attribute names.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanizedLabels;

impl LabelProvider for HumanizedLabels {
    fn label_for(&self, _model: &str, field: &str) -> String {
        humanize(field)
    }
}

/// Turns an attribute name into a label: `created_at` -> `Created at`,
/// `team_id` -> `Team`.
pub fn humanize(name: &str) -> String {
    let trimmed = name.strip_suffix("_id").filter(|s| !s.is_empty()).unwrap_or(name);
    let spaced = trimmed.trim_matches('_').replace('_', " ");

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the descriptors of `model`, in introspection order.
pub fn introspect(
    model: &str,
    models: &dyn ModelProvider,
    labels: &dyn LabelProvider,
) -> AdminResult<Vec<FieldDescriptor>> {
    let attributes = models.attributes(model)?;
    Ok(attributes
        .into_iter()
        .map(|raw| {
            let label = labels.label_for(model, &raw.name);
            FieldDescriptor::from_raw(raw, label)
        })
        .collect())
}
