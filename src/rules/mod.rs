//! Override rules
//!
//! A rule pairs a scope (by type, by name, by predicate, explicit list,
//! include-if) with effects. Rules are applied in declaration order and each
//! one writes only the attributes it sets.

mod effects;
mod rule;

pub use effects::{
    DateFormat, Effects, EvalError, EvalResult, LabelEffect, LabelTransform, Predicate,
    ValueFormatter,
};
pub use rule::{OverrideRule, RuleScope, RuleSet};
