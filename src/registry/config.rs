//! Declarative JSON configuration
//!
//! ```json
//! {
//!   "global": {
//!     "sidescroll": true,
//!     "rules": [{ "fields_of_type": "datetime", "sortable": false }]
//!   },
//!   "models": {
//!     "Team": {
//!       "sidescroll": { "num_frozen_columns": 2 },
//!       "rules": [
//!         { "field": "name", "label": "Team name" },
//!         { "exclude_fields_if": { "type_is": "text" } }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Each rule object carries exactly one scope key plus any effect keys. The
//! file maps one-to-one onto the DSL; closures are replaced by a small set of
//! declarative predicates, label templates and value formats.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{AdminError, AdminResult};
use crate::layout::SidescrollPolicy;
use crate::model::{FieldMeta, SemanticType};
use crate::observability::{log_event_with_fields, Event};
use crate::rules::{DateFormat, Effects, OverrideRule, Predicate};

use super::dsl::{ListSection, RegistryBuilder};
use super::registry::Registry;

/// Root of a configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    #[serde(default)]
    pub global: SectionConfig,
    #[serde(default)]
    pub models: BTreeMap<String, SectionConfig>,
}

/// `true`/`false`, or an explicit leading column count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SidescrollSetting {
    Enabled(bool),
    Frozen { num_frozen_columns: usize },
}

impl SidescrollSetting {
    pub fn policy(self) -> SidescrollPolicy {
        match self {
            SidescrollSetting::Enabled(true) => SidescrollPolicy::on(),
            SidescrollSetting::Enabled(false) => SidescrollPolicy::Off,
            SidescrollSetting::Frozen { num_frozen_columns } => {
                SidescrollPolicy::custom(num_frozen_columns)
            }
        }
    }
}

/// Global defaults or one model's list section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub sidescroll: Option<SidescrollSetting>,
    pub checkboxes: Option<bool>,
    pub items_per_page: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_reverse: Option<bool>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Declarative field predicate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateConfig {
    TypeIs(SemanticType),
    TypeNot(SemanticType),
    NameIn(Vec<String>),
    /// Regular expression over the field name
    NameMatches(String),
    /// Current sortable flag equals the value
    Sortable(bool),
}

impl PredicateConfig {
    pub fn compile(&self) -> AdminResult<Predicate> {
        let predicate = match self.clone() {
            PredicateConfig::TypeIs(t) => Predicate::new(move |m: &FieldMeta| m.semantic_type == t),
            PredicateConfig::TypeNot(t) => Predicate::new(move |m: &FieldMeta| m.semantic_type != t),
            PredicateConfig::NameIn(names) => {
                Predicate::new(move |m: &FieldMeta| names.iter().any(|n| *n == m.name))
            }
            PredicateConfig::NameMatches(pattern) => {
                let re = Regex::new(&pattern).map_err(|e| {
                    AdminError::invalid_config(format!("Invalid name pattern '{}': {}", pattern, e))
                })?;
                Predicate::new(move |m: &FieldMeta| re.is_match(&m.name))
            }
            PredicateConfig::Sortable(flag) => Predicate::new(move |m: &FieldMeta| m.sortable == flag),
        };
        Ok(predicate)
    }
}

/// Declarative cell formatter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormatConfig {
    Upcase,
    Downcase,
    /// Keep at most this many characters, then append "..."
    Truncate(usize),
    /// `{value}` is replaced by the raw value
    Template(String),
}

impl ValueFormatConfig {
    fn apply(&self, value: &Value) -> String {
        let text = match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        match self {
            ValueFormatConfig::Upcase => text.to_uppercase(),
            ValueFormatConfig::Downcase => text.to_lowercase(),
            ValueFormatConfig::Truncate(max) => {
                if text.chars().count() <= *max {
                    text
                } else {
                    let mut cut: String = text.chars().take(*max).collect();
                    cut.push_str("...");
                    cut
                }
            }
            ValueFormatConfig::Template(template) => template.replace("{value}", &text),
        }
    }
}

/// One rule: exactly one scope key plus effect keys
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    // Scope keys
    pub field: Option<String>,
    pub fields: Option<Vec<String>>,
    pub configure: Option<String>,
    pub fields_of_type: Option<SemanticType>,
    pub exclude_fields: Option<Vec<String>>,
    pub exclude_fields_if: Option<PredicateConfig>,
    pub include_fields_if: Option<PredicateConfig>,
    pub fields_where: Option<PredicateConfig>,
    #[serde(default)]
    pub include_all_fields: bool,

    // Effect keys
    pub label: Option<String>,
    /// `{label}` is replaced by the current label
    pub label_template: Option<String>,
    pub visible: Option<bool>,
    pub sortable: Option<bool>,
    pub column_width: Option<u32>,
    pub date_format: Option<DateFormat>,
    pub strftime_format: Option<String>,
    pub value_format: Option<ValueFormatConfig>,
}

impl RuleConfig {
    fn scope_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.field.is_some() {
            keys.push("field");
        }
        if self.fields.is_some() {
            keys.push("fields");
        }
        if self.configure.is_some() {
            keys.push("configure");
        }
        if self.fields_of_type.is_some() {
            keys.push("fields_of_type");
        }
        if self.exclude_fields.is_some() {
            keys.push("exclude_fields");
        }
        if self.exclude_fields_if.is_some() {
            keys.push("exclude_fields_if");
        }
        if self.include_fields_if.is_some() {
            keys.push("include_fields_if");
        }
        if self.fields_where.is_some() {
            keys.push("fields_where");
        }
        if self.include_all_fields {
            keys.push("include_all_fields");
        }
        keys
    }

    fn effects(&self) -> AdminResult<Effects> {
        if self.label.is_some() && self.label_template.is_some() {
            return Err(AdminError::invalid_config(
                "'label' and 'label_template' cannot be combined",
            ));
        }

        let mut effects = Effects::new();
        if let Some(label) = &self.label {
            effects = effects.label(label.clone());
        }
        if let Some(template) = &self.label_template {
            effects = effects.label_template(template.clone());
        }
        if let Some(visible) = self.visible {
            effects = effects.visible(visible);
        }
        if let Some(sortable) = self.sortable {
            effects = effects.sortable(sortable);
        }
        if let Some(width) = self.column_width {
            effects = effects.column_width(width);
        }
        if let Some(format) = self.date_format {
            effects = effects.date_format(format);
        }
        if let Some(pattern) = &self.strftime_format {
            validate_strftime(pattern)?;
            effects = effects.strftime_format(pattern.clone());
        }
        if let Some(format) = &self.value_format {
            let format = format.clone();
            effects = effects.formatted_value(move |value| format.apply(value));
        }
        Ok(effects)
    }

    /// Expands this entry into rules. `exclude_fields` yields one rule per name.
    pub fn to_rules(&self) -> AdminResult<Vec<OverrideRule>> {
        let keys = self.scope_keys();
        if keys.len() != 1 {
            return Err(AdminError::invalid_config(format!(
                "rule must set exactly one scope key, found [{}]",
                keys.join(", ")
            )));
        }

        let effects = self.effects()?;
        let rules = match keys[0] {
            "field" => vec![OverrideRule::explicit(self.field.iter(), effects)],
            "fields" => vec![OverrideRule::explicit(self.fields.iter().flatten(), effects)],
            "configure" => self
                .configure
                .iter()
                .map(|name| OverrideRule::by_name(name.clone(), effects.clone()))
                .collect(),
            "fields_of_type" => self
                .fields_of_type
                .iter()
                .map(|t| OverrideRule::by_type(t.clone(), effects.clone()))
                .collect(),
            "exclude_fields" => self
                .exclude_fields
                .iter()
                .flatten()
                .map(|name| OverrideRule::by_name(name.clone(), effects.clone().hide()))
                .collect(),
            "exclude_fields_if" => compiled(&self.exclude_fields_if)?
                .map(|p| OverrideRule::by_predicate(p, effects.hide()))
                .into_iter()
                .collect(),
            "include_fields_if" => compiled(&self.include_fields_if)?
                .map(|p| OverrideRule::include_if(p, effects))
                .into_iter()
                .collect(),
            "fields_where" => compiled(&self.fields_where)?
                .map(|p| OverrideRule::by_predicate(p, effects))
                .into_iter()
                .collect(),
            _ => vec![OverrideRule::include_if(Predicate::always(), effects)],
        };
        Ok(rules)
    }
}

fn compiled(predicate: &Option<PredicateConfig>) -> AdminResult<Option<Predicate>> {
    predicate.as_ref().map(PredicateConfig::compile).transpose()
}

/// Rejects patterns chrono cannot format with
pub fn validate_strftime(pattern: &str) -> AdminResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(AdminError::invalid_config(format!(
            "Invalid strftime pattern '{}'",
            pattern
        )));
    }
    Ok(())
}

impl SectionConfig {
    fn apply_to(&self, section: &mut ListSection, name: &str) -> AdminResult<()> {
        if let Some(setting) = self.sidescroll {
            section.sidescroll(setting.policy());
        }
        if let Some(checkboxes) = self.checkboxes {
            section.checkboxes(checkboxes);
        }
        if let Some(count) = self.items_per_page {
            section.items_per_page(count);
        }
        if let Some(field) = &self.sort_by {
            section.sort_by(field);
        }
        if let Some(reverse) = self.sort_reverse {
            section.sort_reverse(reverse);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let rules = rule.to_rules().map_err(|e| match e {
                AdminError::InvalidConfig(message) => AdminError::invalid_config(format!(
                    "{} rule #{}: {}",
                    name,
                    index + 1,
                    message
                )),
                other => other,
            })?;
            for rule in rules {
                section.rule(rule);
            }
        }
        Ok(())
    }
}

impl AdminConfig {
    /// Loads a configuration file.
    pub fn load(path: &Path) -> AdminResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AdminError::invalid_config(format!(
                "Failed to read admin config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(content: &str) -> AdminResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| AdminError::invalid_config(format!("Invalid admin config JSON: {}", e)))
    }

    /// Compiles predicates and patterns and freezes the result.
    pub fn into_registry(self) -> AdminResult<Registry> {
        let mut builder = RegistryBuilder::new();
        self.global.apply_to(builder.global_mut(), "global")?;
        for (model, section) in &self.models {
            section.apply_to(builder.model_mut(model), model)?;
        }

        let registry = builder.build();
        let models = self.models.len().to_string();
        let global_rules = registry.global_defaults().len().to_string();
        log_event_with_fields(
            Event::RegistryLoaded,
            &[("models", &models), ("global_rules", &global_rules)],
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{LabelEffect, RuleScope};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rule(json: &str) -> AdminResult<Vec<OverrideRule>> {
        serde_json::from_str::<RuleConfig>(json).unwrap().to_rules()
    }

    #[test]
    fn test_sidescroll_setting_forms() {
        let config = AdminConfig::from_json(
            r#"{
                "global": {"sidescroll": true},
                "models": {
                    "Team": {"sidescroll": {"num_frozen_columns": 2}},
                    "Player": {"sidescroll": false}
                }
            }"#,
        )
        .unwrap();
        let registry = config.into_registry().unwrap();
        assert_eq!(registry.default_sidescroll_policy(), SidescrollPolicy::on());
        assert_eq!(registry.sidescroll_policy_for("Team"), Some(SidescrollPolicy::custom(2)));
        assert_eq!(registry.sidescroll_policy_for("Player"), Some(SidescrollPolicy::Off));
    }

    #[test]
    fn test_exactly_one_scope_key() {
        let err = rule(r#"{"label": "Name"}"#).unwrap_err();
        assert_eq!(err.code(), "ADMIN_INVALID_CONFIG");

        let err = rule(r#"{"field": "name", "configure": "name"}"#).unwrap_err();
        assert!(err.to_string().contains("field, configure"));
    }

    #[test]
    fn test_exclude_fields_expands_per_name() {
        let rules = rule(r#"{"exclude_fields": ["a", "b"]}"#).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules.iter().all(|r| r.effects.visible == Some(false)));
        assert!(matches!(&rules[1].scope, RuleScope::ByName(n) if n == "b"));
    }

    #[test]
    fn test_label_template() {
        let rules = rule(r#"{"fields_of_type": "datetime", "label_template": "{label} (datetime)"}"#)
            .unwrap();
        match &rules[0].effects.label {
            Some(LabelEffect::Transform(t)) => {
                assert_eq!(t.key(), Some("{label} (datetime)"));
                assert_eq!(t.apply("Created at"), "Created at (datetime)");
            }
            other => panic!("unexpected label effect: {:?}", other),
        }
    }

    #[test]
    fn test_value_formats() {
        let rules = rule(r#"{"configure": "name", "value_format": {"truncate": 3}}"#).unwrap();
        let formatter = rules[0].effects.formatter.as_ref().unwrap();
        assert_eq!(formatter.format(&Value::from("abcdef")).unwrap(), "abc...");
        assert_eq!(formatter.format(&Value::from("ab")).unwrap(), "ab");

        assert_eq!(ValueFormatConfig::Upcase.apply(&Value::from("ok")), "OK");
        assert_eq!(
            ValueFormatConfig::Template("#{value}".into()).apply(&Value::from(7)),
            "#7"
        );
    }

    #[test]
    fn test_predicates() {
        let meta = FieldMeta {
            name: "created_at".into(),
            semantic_type: SemanticType::Datetime,
            association: None,
            label: "Created at".into(),
            visible: true,
            sortable: true,
            width: None,
        };
        let check = |json: &str| {
            serde_json::from_str::<PredicateConfig>(json)
                .unwrap()
                .compile()
                .unwrap()
                .evaluate(&meta)
                .unwrap()
        };
        assert!(check(r#"{"type_is": "datetime"}"#));
        assert!(!check(r#"{"type_not": "datetime"}"#));
        assert!(check(r#"{"name_in": ["id", "created_at"]}"#));
        assert!(check(r#"{"name_matches": "_at$"}"#));
        assert!(!check(r#"{"sortable": false}"#));
    }

    #[test]
    fn test_invalid_regex_and_strftime() {
        let err = rule(r#"{"fields_where": {"name_matches": "("}, "visible": false}"#).unwrap_err();
        assert!(err.is_fatal());

        let err = rule(r#"{"configure": "created_at", "strftime_format": "%Q %"}"#).unwrap_err();
        assert_eq!(err.code(), "ADMIN_INVALID_CONFIG");
        assert!(validate_strftime("%Y-%m-%d %H:%M").is_ok());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(AdminConfig::from_json(r#"{"globals": {}}"#).is_err());
        assert!(AdminConfig::from_json(r#"{"global": {"rules": [{"field": "id", "colour": 1}]}}"#).is_err());
    }

    #[test]
    fn test_error_names_the_rule() {
        let config = AdminConfig::from_json(
            r#"{"models": {"Fan": {"rules": [{"field": "id"}, {"visible": false}]}}}"#,
        )
        .unwrap();
        let err = config.into_registry().unwrap_err();
        assert!(err.to_string().contains("Fan rule #2"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"models": {{"Fan": {{"items_per_page": 5, "rules": [{{"fields": ["id", "name"]}}]}}}}}}"#
        )
        .unwrap();

        let registry = AdminConfig::load(file.path()).unwrap().into_registry().unwrap();
        assert_eq!(registry.rules_for("Fan").len(), 1);
        assert_eq!(registry.settings_for("Fan").items_per_page, 5);

        let missing = AdminConfig::load(Path::new("/nonexistent/admin.json")).unwrap_err();
        assert_eq!(missing.code(), "ADMIN_INVALID_CONFIG");
    }
}
