//! Configuration DSL
//!
//! ```ignore
//! let registry = Registry::builder()
//!     .configure(|global| {
//!         global.sidescroll(SidescrollPolicy::on());
//!         global.fields_of_type("datetime", |f| f.sortable(false));
//!     })
//!     .model("Fan", |list| {
//!         list.field_with("id", |f| f.label("Identifier"));
//!         list.field("name");
//!     })
//!     .build();
//! ```
//!
//! Each call appends one rule to the section; nothing is evaluated until the
//! registry is asked to resolve a model.

use std::collections::HashMap;

use crate::layout::SidescrollPolicy;
use crate::model::{FieldMeta, SemanticType};
use crate::rules::{Effects, OverrideRule, Predicate, RuleSet};

use super::registry::Registry;

/// Per-section list options; unset options fall back to the global section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub sidescroll: Option<SidescrollPolicy>,
    pub checkboxes: Option<bool>,
    pub items_per_page: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_reverse: Option<bool>,
}

/// The `list` section of one model, or the global defaults
#[derive(Debug, Clone, Default)]
pub struct ListSection {
    rules: RuleSet,
    options: ListOptions,
}

impl ListSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Append a prebuilt rule
    pub fn rule(&mut self, rule: OverrideRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// List this field, after any already listed
    pub fn field(&mut self, name: &str) -> &mut Self {
        self.field_with(name, |f| f)
    }

    /// List this field and configure it
    pub fn field_with<F>(&mut self, name: &str, configure: F) -> &mut Self
    where
        F: FnOnce(Effects) -> Effects,
    {
        self.rule(OverrideRule::explicit([name], configure(Effects::new())))
    }

    /// List these fields in the given order
    pub fn fields(&mut self, names: &[&str]) -> &mut Self {
        self.fields_with(names, |f| f)
    }

    /// List these fields in the given order, applying the same configuration
    pub fn fields_with<F>(&mut self, names: &[&str], configure: F) -> &mut Self
    where
        F: FnOnce(Effects) -> Effects,
    {
        self.rule(OverrideRule::explicit(
            names.iter().copied(),
            configure(Effects::new()),
        ))
    }

    /// Same as `fields`
    pub fn include_fields(&mut self, names: &[&str]) -> &mut Self {
        self.fields(names)
    }

    /// Configure a field without changing which fields are listed
    pub fn configure<F>(&mut self, name: &str, configure: F) -> &mut Self
    where
        F: FnOnce(Effects) -> Effects,
    {
        self.rule(OverrideRule::by_name(name, configure(Effects::new())))
    }

    /// Configure every field of a type
    pub fn fields_of_type<F>(&mut self, semantic_type: impl Into<SemanticType>, configure: F) -> &mut Self
    where
        F: FnOnce(Effects) -> Effects,
    {
        self.rule(OverrideRule::by_type(semantic_type, configure(Effects::new())))
    }

    /// Configure every field whose current metadata matches
    pub fn fields_where<P, F>(&mut self, predicate: P, configure: F) -> &mut Self
    where
        P: Fn(&FieldMeta) -> bool + Send + Sync + 'static,
        F: FnOnce(Effects) -> Effects,
    {
        self.rule(OverrideRule::by_predicate(
            Predicate::new(predicate),
            configure(Effects::new()),
        ))
    }

    /// Hide these fields
    pub fn exclude_fields(&mut self, names: &[&str]) -> &mut Self {
        for name in names {
            self.rule(OverrideRule::by_name(*name, Effects::new().hide()));
        }
        self
    }

    /// Hide every field whose current metadata matches
    pub fn exclude_fields_if<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Fn(&FieldMeta) -> bool + Send + Sync + 'static,
    {
        self.rule(OverrideRule::by_predicate(
            Predicate::new(predicate),
            Effects::new().hide(),
        ))
    }

    /// List only fields matching, plus any listed explicitly
    pub fn include_fields_if<P>(&mut self, predicate: P) -> &mut Self
    where
        P: Fn(&FieldMeta) -> bool + Send + Sync + 'static,
    {
        self.rule(OverrideRule::include_if(Predicate::new(predicate), Effects::new()))
    }

    /// List every field; explicitly listed fields still come first
    pub fn include_all_fields(&mut self) -> &mut Self {
        self.rule(OverrideRule::include_if(Predicate::always(), Effects::new()))
    }

    pub fn sidescroll(&mut self, policy: SidescrollPolicy) -> &mut Self {
        self.options.sidescroll = Some(policy);
        self
    }

    pub fn checkboxes(&mut self, enabled: bool) -> &mut Self {
        self.options.checkboxes = Some(enabled);
        self
    }

    pub fn items_per_page(&mut self, count: usize) -> &mut Self {
        self.options.items_per_page = Some(count);
        self
    }

    pub fn sort_by(&mut self, field: &str) -> &mut Self {
        self.options.sort_by = Some(field.to_string());
        self
    }

    pub fn sort_reverse(&mut self, reverse: bool) -> &mut Self {
        self.options.sort_reverse = Some(reverse);
        self
    }
}

/// Collects global and per-model sections, then freezes them into a `Registry`
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    global: ListSection,
    models: HashMap<String, ListSection>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the global defaults applied to every model
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ListSection),
    {
        f(&mut self.global);
        self
    }

    /// Configure one model's list section; repeated calls append
    pub fn model<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(&mut ListSection),
    {
        f(self.models.entry(name.to_string()).or_default());
        self
    }

    pub fn global_mut(&mut self) -> &mut ListSection {
        &mut self.global
    }

    pub fn model_mut(&mut self, name: &str) -> &mut ListSection {
        self.models.entry(name.to_string()).or_default()
    }

    pub fn build(self) -> Registry {
        Registry::new(self.global, self.models)
    }
}
