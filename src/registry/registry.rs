//! Immutable configuration registry
//!
//! Built once from the DSL or a configuration file, then only read. Reloading
//! means building a new registry and swapping it in (see `SharedRegistry`).

use std::collections::HashMap;

use serde::Serialize;

use crate::layout::SidescrollPolicy;
use crate::rules::RuleSet;

use super::dsl::{ListSection, RegistryBuilder};

/// Items per page when neither the model nor the global section sets it
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Field the list is sorted by when no `sort_by` is configured
pub const DEFAULT_SORT_FIELD: &str = "id";

/// Default ordering of list rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: String,
    /// Descending when true
    pub reverse: bool,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, reverse: bool) -> Self {
        Self {
            field: field.into(),
            reverse,
        }
    }
}

/// List options with every fallback applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub sidescroll: SidescrollPolicy,
    pub checkboxes: bool,
    pub items_per_page: usize,
    pub sort: SortSpec,
}

/// Process-wide admin configuration
#[derive(Debug, Clone)]
pub struct Registry {
    global: ListSection,
    models: HashMap<String, ListSection>,
    empty_rules: RuleSet,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn new(global: ListSection, models: HashMap<String, ListSection>) -> Self {
        Self {
            global,
            models,
            empty_rules: RuleSet::new(),
        }
    }

    /// Rules applied to every model, before the model's own rules
    pub fn global_defaults(&self) -> &RuleSet {
        self.global.rules()
    }

    /// The model's own rules (empty when the model has no section)
    pub fn rules_for(&self, model: &str) -> &RuleSet {
        self.models
            .get(model)
            .map(ListSection::rules)
            .unwrap_or(&self.empty_rules)
    }

    /// Global rules followed by the model's rules
    pub fn effective_rules(&self, model: &str) -> RuleSet {
        RuleSet::layered(self.global_defaults(), self.rules_for(model))
    }

    /// Sidescroll policy set on the model itself
    pub fn sidescroll_policy_for(&self, model: &str) -> Option<SidescrollPolicy> {
        self.models.get(model).and_then(|s| s.options().sidescroll)
    }

    /// Global sidescroll policy, `Off` when unset
    pub fn default_sidescroll_policy(&self) -> SidescrollPolicy {
        self.global.options().sidescroll.unwrap_or_default()
    }

    /// Every list option of a model with the fallbacks applied
    pub fn settings_for(&self, model: &str) -> ListSettings {
        let global = self.global.options();
        let local = self.models.get(model).map(ListSection::options);

        let sidescroll = SidescrollPolicy::resolve(
            self.sidescroll_policy_for(model),
            global.sidescroll,
        );
        let checkboxes = local
            .and_then(|o| o.checkboxes)
            .or(global.checkboxes)
            .unwrap_or(true);
        let items_per_page = local
            .and_then(|o| o.items_per_page)
            .or(global.items_per_page)
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE);
        let sort_field = local
            .and_then(|o| o.sort_by.clone())
            .or_else(|| global.sort_by.clone())
            .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string());
        let reverse = local
            .and_then(|o| o.sort_reverse)
            .or(global.sort_reverse)
            .unwrap_or(true);

        ListSettings {
            sidescroll,
            checkboxes,
            items_per_page,
            sort: SortSpec::new(sort_field, reverse),
        }
    }

    /// Models with their own section, sorted
    pub fn configured_models(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        RegistryBuilder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_defaults() {
        let registry = Registry::default();
        assert!(registry.global_defaults().is_empty());
        assert!(registry.rules_for("Fan").is_empty());
        assert_eq!(registry.default_sidescroll_policy(), SidescrollPolicy::Off);

        let settings = registry.settings_for("Fan");
        assert_eq!(settings.sidescroll, SidescrollPolicy::Off);
        assert!(settings.checkboxes);
        assert_eq!(settings.items_per_page, DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(settings.sort, SortSpec::new("id", true));
    }

    #[test]
    fn test_model_overrides_global() {
        let registry = Registry::builder()
            .configure(|g| {
                g.sidescroll(SidescrollPolicy::on()).items_per_page(50);
            })
            .model("Team", |l| {
                l.sidescroll(SidescrollPolicy::Off).checkboxes(false);
            })
            .model("League", |l| {
                l.items_per_page(1).sort_by("created_at");
            })
            .build();

        let team = registry.settings_for("Team");
        assert_eq!(team.sidescroll, SidescrollPolicy::Off);
        assert!(!team.checkboxes);
        assert_eq!(team.items_per_page, 50);

        let league = registry.settings_for("League");
        assert_eq!(league.sidescroll, SidescrollPolicy::on());
        assert_eq!(league.items_per_page, 1);
        assert_eq!(league.sort, SortSpec::new("created_at", true));

        assert_eq!(registry.sidescroll_policy_for("Player"), None);
        assert_eq!(registry.settings_for("Player").sidescroll, SidescrollPolicy::on());
    }

    #[test]
    fn test_effective_rules_layering() {
        let registry = Registry::builder()
            .configure(|g| {
                g.fields_of_type("datetime", |f| f.sortable(false));
            })
            .model("Fan", |l| {
                l.field("id").field("name");
            })
            .build();
        assert_eq!(registry.effective_rules("Fan").len(), 3);
        assert_eq!(registry.effective_rules("Team").len(), 1);
        assert_eq!(registry.configured_models(), vec!["Fan"]);
    }
}
