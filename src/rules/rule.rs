//! Override rules and ordered rule sets

use crate::model::SemanticType;

use super::effects::{Effects, Predicate};

/// Which fields a rule applies to
#[derive(Debug, Clone)]
pub enum RuleScope {
    /// Every field of a semantic type
    ByType(SemanticType),
    /// One named field; does not change which fields are listed
    ByName(String),
    /// Fields whose current metadata satisfies the predicate
    ByPredicate(Predicate),
    /// Restrict the listed fields to these names, in this order
    Explicit(Vec<String>),
    /// Restrict the listed fields to those matching, in descriptor order
    IncludeIf(Predicate),
}

impl RuleScope {
    /// Whether this scope restricts the set of listed fields
    pub fn restricts_listing(&self) -> bool {
        matches!(self, RuleScope::Explicit(_) | RuleScope::IncludeIf(_))
    }

    /// Field names this scope references directly
    pub fn named_fields(&self) -> &[String] {
        match self {
            RuleScope::ByName(name) => std::slice::from_ref(name),
            RuleScope::Explicit(names) => names,
            _ => &[],
        }
    }
}

/// A scope plus the attributes it sets on every field it selects
#[derive(Debug, Clone)]
pub struct OverrideRule {
    pub scope: RuleScope,
    pub effects: Effects,
}

impl OverrideRule {
    pub fn new(scope: RuleScope, effects: Effects) -> Self {
        Self { scope, effects }
    }

    pub fn by_type(semantic_type: impl Into<SemanticType>, effects: Effects) -> Self {
        Self::new(RuleScope::ByType(semantic_type.into()), effects)
    }

    pub fn by_name(name: impl Into<String>, effects: Effects) -> Self {
        Self::new(RuleScope::ByName(name.into()), effects)
    }

    pub fn by_predicate(predicate: Predicate, effects: Effects) -> Self {
        Self::new(RuleScope::ByPredicate(predicate), effects)
    }

    pub fn explicit<I, S>(names: I, effects: Effects) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            RuleScope::Explicit(names.into_iter().map(Into::into).collect()),
            effects,
        )
    }

    pub fn include_if(predicate: Predicate, effects: Effects) -> Self {
        Self::new(RuleScope::IncludeIf(predicate), effects)
    }
}

/// Rules in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<OverrideRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: OverrideRule) {
        self.rules.push(rule);
    }

    /// Builder-style push
    pub fn with(mut self, rule: OverrideRule) -> Self {
        self.push(rule);
        self
    }

    /// Global rules followed by model rules
    pub fn layered(global: &RuleSet, model: &RuleSet) -> RuleSet {
        let mut rules = Vec::with_capacity(global.len() + model.len());
        rules.extend(global.rules.iter().cloned());
        rules.extend(model.rules.iter().cloned());
        RuleSet { rules }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OverrideRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<OverrideRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = OverrideRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<OverrideRule> for RuleSet {
    fn extend<T: IntoIterator<Item = OverrideRule>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a OverrideRule;
    type IntoIter = std::slice::Iter<'a, OverrideRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
