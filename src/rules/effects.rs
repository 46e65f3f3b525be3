//! Rule effects and the closures they carry
//!
//! Every effect is optional: a rule only touches the attributes it sets.
//! Label effects are either a fixed string or a transform of the current
//! label; transforms are folded in rule order at resolution time.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::{FieldMeta, SemanticType};

/// Error raised by a user-supplied predicate or formatter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for predicate and formatter evaluation
pub type EvalResult<T> = Result<T, EvalError>;

type PredicateFn = dyn Fn(&FieldMeta) -> EvalResult<bool> + Send + Sync;
type TransformFn = dyn Fn(&str) -> String + Send + Sync;
type FormatterFn = dyn Fn(&Value) -> EvalResult<String> + Send + Sync;

/// Boolean test over the current field metadata.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wrap an infallible test
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FieldMeta) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(move |meta| Ok(f(meta))))
    }

    /// Wrap a test that may fail; failures propagate out of resolution
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&FieldMeta) -> EvalResult<bool> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Matches every field
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    pub fn evaluate(&self, meta: &FieldMeta) -> EvalResult<bool> {
        (self.0)(meta)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Function from the current label to the next one.
///
/// Transforms built from data (a label template) carry the template as their
/// key. Closure transforms have no key and are compared by what they did.
#[derive(Clone)]
pub struct LabelTransform {
    key: Option<Arc<str>>,
    f: Arc<TransformFn>,
}

impl LabelTransform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            key: None,
            f: Arc::new(f),
        }
    }

    /// Substitutes `{label}` in `template` with the current label
    pub fn template(template: impl Into<String>) -> Self {
        let template: String = template.into();
        let template: Arc<str> = Arc::from(template);
        let pattern = Arc::clone(&template);
        Self {
            key: Some(template),
            f: Arc::new(move |current| pattern.replace("{label}", current)),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn apply(&self, current: &str) -> String {
        (self.f)(current)
    }

    /// Whether both handles point at the same transform
    pub fn same_as(&self, other: &LabelTransform) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }

    /// Whether `self` would repeat an earlier application of `other` that
    /// turned `input` into `output`
    pub fn repeats(&self, other: &LabelTransform, input: &str, output: &str) -> bool {
        if self.same_as(other) {
            return true;
        }
        match (self.key(), other.key()) {
            (Some(a), Some(b)) => a == b,
            _ => self.apply(input) == output,
        }
    }
}

impl fmt::Debug for LabelTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "LabelTransform({:?})", key),
            None => f.write_str("LabelTransform(..)"),
        }
    }
}

/// Label override carried by a rule
#[derive(Debug, Clone)]
pub enum LabelEffect {
    Fixed(String),
    Transform(LabelTransform),
}

/// Produces the displayed cell text from a raw record value.
#[derive(Clone)]
pub struct ValueFormatter(Arc<FormatterFn>);

impl ValueFormatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(move |value| Ok(f(value))))
    }

    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> EvalResult<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn format(&self, value: &Value) -> EvalResult<String> {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

/// Named date formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    #[default]
    Default,
    Short,
    Long,
}

impl DateFormat {
    /// strftime pattern for this format and a temporal type
    pub fn pattern(&self, semantic_type: &SemanticType) -> &'static str {
        match (semantic_type, self) {
            (SemanticType::Date, DateFormat::Short) => "%b %d",
            (SemanticType::Date, _) => "%B %d, %Y",
            (SemanticType::Time, DateFormat::Long) => "%H:%M:%S",
            (SemanticType::Time, _) => "%H:%M",
            (_, DateFormat::Short) => "%d %b %H:%M",
            (_, _) => "%B %d, %Y %H:%M",
        }
    }
}

/// The attributes one rule sets. Unset attributes are left untouched.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub label: Option<LabelEffect>,
    pub visible: Option<bool>,
    pub sortable: Option<bool>,
    pub width: Option<u32>,
    pub formatter: Option<ValueFormatter>,
    pub date_format: Option<DateFormat>,
    pub strftime_format: Option<String>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(LabelEffect::Fixed(label.into()));
        self
    }

    /// Derive the label from the current one
    pub fn label_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.label = Some(LabelEffect::Transform(LabelTransform::new(f)));
        self
    }

    /// Derive the label from a template; `{label}` is the current label
    pub fn label_template(mut self, template: impl Into<String>) -> Self {
        self.label = Some(LabelEffect::Transform(LabelTransform::template(template)));
        self
    }

    pub fn hide(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    pub fn show(mut self) -> Self {
        self.visible = Some(true);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    /// Column width in pixels
    pub fn column_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn formatted_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(ValueFormatter::new(f));
        self
    }

    pub fn try_formatted_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> EvalResult<String> + Send + Sync + 'static,
    {
        self.formatter = Some(ValueFormatter::try_new(f));
        self
    }

    pub fn date_format(mut self, format: DateFormat) -> Self {
        self.date_format = Some(format);
        self
    }

    /// strftime pattern; wins over `date_format`
    pub fn strftime_format(mut self, pattern: impl Into<String>) -> Self {
        self.strftime_format = Some(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDescriptor;
    use serde_json::json;

    fn meta(name: &str, semantic_type: SemanticType) -> FieldMeta {
        FieldMeta::from(&FieldDescriptor::new(name, semantic_type, name))
    }

    #[test]
    fn test_predicate_evaluates_against_meta() {
        let is_datetime = Predicate::new(|m| m.semantic_type == SemanticType::Datetime);
        assert!(is_datetime.evaluate(&meta("created_at", SemanticType::Datetime)).unwrap());
        assert!(!is_datetime.evaluate(&meta("id", SemanticType::Integer)).unwrap());
    }

    #[test]
    fn test_predicate_error_is_returned() {
        let broken = Predicate::try_new(|m| Err(EvalError::new(format!("cannot test {}", m.name))));
        let err = broken.evaluate(&meta("id", SemanticType::Integer)).unwrap_err();
        assert_eq!(err.message(), "cannot test id");
    }

    #[test]
    fn test_transform_identity() {
        let a = LabelTransform::new(|l| format!("{} (datetime)", l));
        let b = a.clone();
        let c = LabelTransform::new(|l| format!("{} (datetime)", l));
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        assert_eq!(a.apply("Created at"), "Created at (datetime)");
        assert!(c.repeats(&a, "Created at", "Created at (datetime)"));
        assert!(!c.repeats(&a, "Created at", "Created at"));
    }

    #[test]
    fn test_template_transforms_compare_by_key() {
        let a = LabelTransform::template("{label} (datetime)");
        let b = LabelTransform::template("{label} (datetime)");
        let c = LabelTransform::template("{label}!");
        assert_eq!(a.key(), Some("{label} (datetime)"));
        assert_eq!(a.apply("Created at"), "Created at (datetime)");
        assert!(b.repeats(&a, "", ""));
        assert!(!c.repeats(&a, "Created at", "Created at!"));
    }

    #[test]
    fn test_formatter() {
        let upcase = ValueFormatter::new(|v| v.as_str().unwrap_or_default().to_uppercase());
        assert_eq!(upcase.format(&json!("mike")).unwrap(), "MIKE");
    }

    #[test]
    fn test_date_format_patterns() {
        assert_eq!(DateFormat::Short.pattern(&SemanticType::Datetime), "%d %b %H:%M");
        assert_eq!(DateFormat::Default.pattern(&SemanticType::Date), "%B %d, %Y");
        assert_eq!(DateFormat::Long.pattern(&SemanticType::Time), "%H:%M:%S");
    }

    #[test]
    fn test_effects_builder() {
        let effects = Effects::new().label("Identifier").sortable(false).column_width(200);
        assert!(matches!(effects.label, Some(LabelEffect::Fixed(ref l)) if l == "Identifier"));
        assert_eq!(effects.sortable, Some(false));
        assert_eq!(effects.width, Some(200));
        assert!(effects.visible.is_none());
    }
}
