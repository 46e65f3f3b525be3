//! Field resolution
//!
//! Merges a model's descriptors with an ordered rule set:
//!
//! 1. Every name referenced by `ByName` / `Explicit` must exist, otherwise
//!    resolution fails with `UnknownField` before any rule runs.
//! 2. Rules apply in declaration order. Scalars overwrite, label transforms
//!    fold over the current label, predicates see earlier effects.
//! 3. If any `Explicit` / `IncludeIf` rule exists, only the fields they
//!    select are listed: explicit names first (first occurrence fixes the
//!    position), then predicate-included fields in descriptor order.
//!    Otherwise every descriptor is listed in introspection order.
//! 4. Listed fields with `visible = true` form the output; everything else is
//!    kept as hidden for diagnostics.

use std::collections::HashMap;

use crate::errors::{AdminError, AdminResult};
use crate::model::{FieldDescriptor, FieldMeta};
use crate::rules::{
    DateFormat, Effects, LabelEffect, LabelTransform, OverrideRule, Predicate, RuleScope, RuleSet,
    ValueFormatter,
};

use super::field::ResolvedField;

/// Outcome of resolving one model
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    visible: Vec<ResolvedField>,
    hidden: Vec<ResolvedField>,
}

impl Resolution {
    /// Listed, visible fields in display order
    pub fn visible(&self) -> &[ResolvedField] {
        &self.visible
    }

    /// Fields excluded by a rule or by an explicit listing, in descriptor order
    pub fn hidden(&self) -> &[ResolvedField] {
        &self.hidden
    }

    pub fn into_visible(self) -> Vec<ResolvedField> {
        self.visible
    }

    pub fn into_parts(self) -> (Vec<ResolvedField>, Vec<ResolvedField>) {
        (self.visible, self.hidden)
    }

    /// Looks a field up among visible and hidden fields
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.visible
            .iter()
            .chain(self.hidden.iter())
            .find(|f| f.name() == name)
    }
}

/// A label transform already folded into a field
struct AppliedTransform {
    transform: LabelTransform,
    input: String,
    output: String,
}

/// A field while rules are being applied
struct WorkingField {
    meta: FieldMeta,
    applied_transforms: Vec<AppliedTransform>,
    formatter: Option<ValueFormatter>,
    date_format: Option<DateFormat>,
    strftime_format: Option<String>,
    included_by_predicate: bool,
}

impl WorkingField {
    fn new(descriptor: &FieldDescriptor) -> Self {
        Self {
            meta: FieldMeta::from(descriptor),
            applied_transforms: Vec::new(),
            formatter: None,
            date_format: None,
            strftime_format: None,
            included_by_predicate: false,
        }
    }

    fn apply(&mut self, effects: &Effects) {
        match &effects.label {
            Some(LabelEffect::Fixed(label)) => {
                self.meta.label = label.clone();
                self.applied_transforms.clear();
            }
            Some(LabelEffect::Transform(transform)) => {
                // Each distinct transform folds in once per field.
                let repeated = self
                    .applied_transforms
                    .iter()
                    .any(|a| transform.repeats(&a.transform, &a.input, &a.output));
                if !repeated {
                    let output = transform.apply(&self.meta.label);
                    let input = std::mem::replace(&mut self.meta.label, output.clone());
                    self.applied_transforms.push(AppliedTransform {
                        transform: transform.clone(),
                        input,
                        output,
                    });
                }
            }
            None => {}
        }
        if let Some(visible) = effects.visible {
            self.meta.visible = visible;
        }
        if let Some(sortable) = effects.sortable {
            self.meta.sortable = sortable;
        }
        if let Some(width) = effects.width {
            self.meta.width = Some(width);
        }
        if let Some(formatter) = &effects.formatter {
            self.formatter = Some(formatter.clone());
        }
        if let Some(date_format) = effects.date_format {
            self.date_format = Some(date_format);
        }
        if let Some(pattern) = &effects.strftime_format {
            self.strftime_format = Some(pattern.clone());
        }
    }

    fn finish(self, order: usize) -> ResolvedField {
        ResolvedField {
            meta: self.meta,
            order,
            formatter: self.formatter,
            date_format: self.date_format,
            strftime_format: self.strftime_format,
        }
    }
}

/// Resolves field configuration for one model.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    model: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn for_model(model: &'a str) -> Self {
        Self { model }
    }

    /// Visible fields in display order.
    pub fn resolve(
        &self,
        descriptors: &[FieldDescriptor],
        rules: &RuleSet,
    ) -> AdminResult<Vec<ResolvedField>> {
        Ok(self.resolve_all(descriptors, rules)?.into_visible())
    }

    /// Visible fields plus the hidden remainder.
    pub fn resolve_all(
        &self,
        descriptors: &[FieldDescriptor],
        rules: &RuleSet,
    ) -> AdminResult<Resolution> {
        let index: HashMap<&str, usize> = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.as_str(), i))
            .collect();

        self.check_references(&index, rules)?;

        let mut working: Vec<WorkingField> = descriptors.iter().map(WorkingField::new).collect();
        let mut explicit_order: Vec<usize> = Vec::new();
        let mut restricted = false;

        for rule in rules {
            restricted |= rule.scope.restricts_listing();
            self.apply_rule(rule, &index, &mut working, &mut explicit_order)?;
        }

        let listed: Vec<usize> = if restricted {
            let mut listed = explicit_order.clone();
            listed.extend(
                (0..working.len())
                    .filter(|i| working[*i].included_by_predicate && !explicit_order.contains(i)),
            );
            listed
        } else {
            (0..working.len()).collect()
        };

        let mut slots: Vec<Option<WorkingField>> = working.into_iter().map(Some).collect();
        let mut visible = Vec::new();
        for i in &listed {
            if slots[*i].as_ref().map_or(false, |f| f.meta.visible) {
                if let Some(field) = slots[*i].take() {
                    visible.push(field.finish(visible.len()));
                }
            }
        }

        let mut hidden = Vec::new();
        for mut field in slots.into_iter().flatten() {
            field.meta.visible = false;
            hidden.push(field.finish(visible.len() + hidden.len()));
        }

        Ok(Resolution { visible, hidden })
    }

    fn check_references(&self, index: &HashMap<&str, usize>, rules: &RuleSet) -> AdminResult<()> {
        for rule in rules {
            for name in rule.scope.named_fields() {
                if !index.contains_key(name.as_str()) {
                    return Err(AdminError::unknown_field(self.model, name));
                }
            }
        }
        Ok(())
    }

    fn apply_rule(
        &self,
        rule: &OverrideRule,
        index: &HashMap<&str, usize>,
        working: &mut [WorkingField],
        explicit_order: &mut Vec<usize>,
    ) -> AdminResult<()> {
        match &rule.scope {
            RuleScope::ByType(semantic_type) => {
                for field in working.iter_mut() {
                    if &field.meta.semantic_type == semantic_type {
                        field.apply(&rule.effects);
                    }
                }
            }
            RuleScope::ByName(name) => {
                if let Some(&i) = index.get(name.as_str()) {
                    working[i].apply(&rule.effects);
                }
            }
            RuleScope::ByPredicate(predicate) => {
                for field in working.iter_mut() {
                    if self.matches(predicate, field)? {
                        field.apply(&rule.effects);
                    }
                }
            }
            RuleScope::Explicit(names) => {
                for name in names {
                    if let Some(&i) = index.get(name.as_str()) {
                        if !explicit_order.contains(&i) {
                            explicit_order.push(i);
                        }
                        working[i].apply(&rule.effects);
                    }
                }
            }
            RuleScope::IncludeIf(predicate) => {
                for field in working.iter_mut() {
                    if self.matches(predicate, field)? {
                        field.included_by_predicate = true;
                        field.apply(&rule.effects);
                    }
                }
            }
        }
        Ok(())
    }

    fn matches(&self, predicate: &Predicate, field: &WorkingField) -> AdminResult<bool> {
        predicate
            .evaluate(&field.meta)
            .map_err(|source| AdminError::PredicateFailed {
                model: self.model.to_string(),
                field: field.meta.name.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SemanticType;
    use crate::rules::EvalError;

    fn fan() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", SemanticType::Integer, "Id"),
            FieldDescriptor::new("created_at", SemanticType::Datetime, "Created at"),
            FieldDescriptor::new("updated_at", SemanticType::Datetime, "Updated at"),
            FieldDescriptor::new("name", SemanticType::String, "Their Name"),
        ]
    }

    fn names(fields: &[ResolvedField]) -> Vec<&str> {
        fields.iter().map(|f| f.name()).collect()
    }

    fn resolve(rules: RuleSet) -> AdminResult<Resolution> {
        Resolver::for_model("Fan").resolve_all(&fan(), &rules)
    }

    #[test]
    fn test_no_rules_keeps_introspection_order() {
        let resolution = resolve(RuleSet::new()).unwrap();
        assert_eq!(names(resolution.visible()), ["id", "created_at", "updated_at", "name"]);
        assert!(resolution.hidden().is_empty());
        let orders: Vec<_> = resolution.visible().iter().map(|f| f.order()).collect();
        assert_eq!(orders, [0, 1, 2, 3]);
    }

    #[test]
    fn test_hidden_fields_stay_resolvable() {
        let rules = RuleSet::new().with(OverrideRule::by_type("datetime", Effects::new().hide()));
        let resolution = resolve(rules).unwrap();
        assert_eq!(names(resolution.visible()), ["id", "name"]);
        assert_eq!(names(resolution.hidden()), ["created_at", "updated_at"]);
        let hidden = resolution.field("created_at").unwrap();
        assert!(!hidden.visible());
        assert_eq!(hidden.order(), 2);
    }

    #[test]
    fn test_explicit_drops_unlisted_and_orders() {
        let rules = RuleSet::new()
            .with(OverrideRule::explicit(["name", "id"], Effects::new()))
            .with(OverrideRule::explicit(["id", "created_at"], Effects::new()));
        let resolution = resolve(rules).unwrap();
        assert_eq!(names(resolution.visible()), ["name", "id", "created_at"]);
        assert_eq!(names(resolution.hidden()), ["updated_at"]);
    }

    #[test]
    fn test_explicit_effects_apply_to_each_listed_field() {
        let rules = RuleSet::new().with(OverrideRule::explicit(
            ["name", "id"],
            Effects::new().label_with(|l| format!("Modified {}", l)),
        ));
        let resolution = resolve(rules).unwrap();
        let labels: Vec<_> = resolution.visible().iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["Modified Their Name", "Modified Id"]);
    }

    #[test]
    fn test_unknown_explicit_name_fails_before_other_rules() {
        let failing = Predicate::try_new(|_| Err(EvalError::new("should not run")));
        let rules = RuleSet::new()
            .with(OverrideRule::by_predicate(failing, Effects::new().hide()))
            .with(OverrideRule::explicit(["id", "nickname"], Effects::new()));
        let err = resolve(rules).unwrap_err();
        assert!(matches!(err, AdminError::UnknownField { ref field, .. } if field == "nickname"));
    }

    #[test]
    fn test_unknown_by_name_fails() {
        let rules = RuleSet::new().with(OverrideRule::by_name("nickname", Effects::new().hide()));
        assert_eq!(resolve(rules).unwrap_err().code(), "ADMIN_UNKNOWN_FIELD");
    }

    #[test]
    fn test_unknown_type_matches_nothing() {
        let rules = RuleSet::new().with(OverrideRule::by_type("geometry", Effects::new().hide()));
        assert_eq!(resolve(rules).unwrap().visible().len(), 4);
    }

    #[test]
    fn test_predicate_failure_propagates() {
        let failing = Predicate::try_new(|m| {
            if m.name == "name" {
                Err(EvalError::new("no such method"))
            } else {
                Ok(false)
            }
        });
        let rules = RuleSet::new().with(OverrideRule::by_predicate(failing, Effects::new().hide()));
        match resolve(rules).unwrap_err() {
            AdminError::PredicateFailed { field, source, .. } => {
                assert_eq!(field, "name");
                assert_eq!(source.message(), "no such method");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_predicates_observe_earlier_effects() {
        let rules = RuleSet::new()
            .with(OverrideRule::by_name("name", Effects::new().sortable(false)))
            .with(OverrideRule::by_predicate(
                Predicate::new(|m| !m.sortable),
                Effects::new().label("Unsortable"),
            ));
        let resolution = resolve(rules).unwrap();
        assert_eq!(resolution.field("name").unwrap().label(), "Unsortable");
        assert_eq!(resolution.field("id").unwrap().label(), "Id");
    }

    #[test]
    fn test_type_hide_then_name_show() {
        let rules = RuleSet::new()
            .with(OverrideRule::by_type("datetime", Effects::new().hide()))
            .with(OverrideRule::by_name("created_at", Effects::new().show()));
        let resolution = resolve(rules).unwrap();
        assert_eq!(names(resolution.visible()), ["id", "created_at", "name"]);
    }

    #[test]
    fn test_last_sortable_wins() {
        let rules = RuleSet::new()
            .with(OverrideRule::by_type("datetime", Effects::new().sortable(false)))
            .with(OverrideRule::by_name("updated_at", Effects::new().sortable(true)));
        let resolution = resolve(rules).unwrap();
        assert!(!resolution.field("created_at").unwrap().sortable());
        assert!(resolution.field("updated_at").unwrap().sortable());
    }

    #[test]
    fn test_label_transforms_compose() {
        let rules = RuleSet::new()
            .with(OverrideRule::by_type(
                "datetime",
                Effects::new().label_with(|l| format!("{} (datetime)", l)),
            ))
            .with(OverrideRule::by_name(
                "created_at",
                Effects::new().label_with(|l| l.to_uppercase()),
            ));
        let resolution = resolve(rules).unwrap();
        assert_eq!(resolution.field("created_at").unwrap().label(), "CREATED AT (DATETIME)");
        assert_eq!(resolution.field("updated_at").unwrap().label(), "Updated at (datetime)");
    }

    #[test]
    fn test_repeated_transform_rule_is_idempotent() {
        let rule = OverrideRule::by_type(
            "datetime",
            Effects::new().label_with(|l| format!("{} (datetime)", l)),
        );
        let once = resolve(RuleSet::new().with(rule.clone())).unwrap();
        let twice = resolve(RuleSet::new().with(rule.clone()).with(rule)).unwrap();
        assert_eq!(
            once.field("created_at").unwrap().label(),
            twice.field("created_at").unwrap().label()
        );
    }

    #[test]
    fn test_separately_declared_transforms_fold_once() {
        let suffix = || Effects::new().label_with(|l| format!("{} (datetime)", l));
        let rules = RuleSet::new()
            .with(OverrideRule::by_type("datetime", suffix()))
            .with(OverrideRule::by_name("created_at", Effects::new().label_with(|l| l.to_uppercase())))
            .with(OverrideRule::by_type("datetime", suffix()));
        let resolution = resolve(rules).unwrap();
        assert_eq!(resolution.field("created_at").unwrap().label(), "CREATED AT (DATETIME)");
        assert_eq!(resolution.field("updated_at").unwrap().label(), "Updated at (datetime)");
    }

    #[test]
    fn test_fixed_label_resets_folded_transforms() {
        let rules = RuleSet::new()
            .with(OverrideRule::by_name("id", Effects::new().label_template("{label}!")))
            .with(OverrideRule::by_name("id", Effects::new().label("Key")))
            .with(OverrideRule::by_name("id", Effects::new().label_template("{label}!")));
        let resolution = resolve(rules).unwrap();
        assert_eq!(resolution.field("id").unwrap().label(), "Key!");
    }

    #[test]
    fn test_include_if_lists_matching_fields() {
        let rules = RuleSet::new().with(OverrideRule::include_if(
            Predicate::new(|m| m.semantic_type != SemanticType::Datetime),
            Effects::new(),
        ));
        let resolution = resolve(rules).unwrap();
        assert_eq!(names(resolution.visible()), ["id", "name"]);
    }

    #[test]
    fn test_explicit_then_predicate_included() {
        let rules = RuleSet::new()
            .with(OverrideRule::include_if(
                Predicate::new(|m| m.semantic_type == SemanticType::Datetime),
                Effects::new(),
            ))
            .with(OverrideRule::explicit(["name"], Effects::new()));
        let resolution = resolve(rules).unwrap();
        assert_eq!(names(resolution.visible()), ["name", "created_at", "updated_at"]);
    }

    #[test]
    fn test_explicit_field_can_still_be_hidden() {
        let rules = RuleSet::new()
            .with(OverrideRule::explicit(["name", "id"], Effects::new()))
            .with(OverrideRule::by_name("id", Effects::new().hide()));
        let resolution = resolve(rules).unwrap();
        assert_eq!(names(resolution.visible()), ["name"]);
    }

    #[test]
    fn test_formatting_effects_last_writer_wins() {
        let rules = RuleSet::new()
            .with(OverrideRule::by_type("datetime", Effects::new().date_format(DateFormat::Long)))
            .with(OverrideRule::by_name("created_at", Effects::new().strftime_format("%Y-%m-%d")))
            .with(OverrideRule::by_name("updated_at", Effects::new().date_format(DateFormat::Short)));
        let resolution = resolve(rules).unwrap();
        assert_eq!(resolution.field("created_at").unwrap().date_pattern(), "%Y-%m-%d");
        assert_eq!(resolution.field("updated_at").unwrap().date_pattern(), "%d %b %H:%M");
    }
}
