//! List layout planning
//!
//! Assigns every column of a list table to a frozen zone:
//!
//! - `Off`: nothing is frozen.
//! - Otherwise the first `leading` columns (checkbox included) are
//!   `FrozenLeading` and the last `TRAILING_FROZEN_COLUMNS` are
//!   `FrozenTrailing`. The zones never overlap; leading wins at the boundary.
//! - With zero leading columns the table is still marked as a sidescroll
//!   table, but nothing is frozen and the sidescroll marker is absent.
//!
//! Rendered cells of leading columns carry `ra-sidescroll-frozen`; the last
//! leading column also carries `ra-sidescroll-frozen-last`, where the frozen
//! block ends. The trailing zone is reserved for action columns appended by
//! the host page and adds no class to field cells.

use serde::Serialize;

use crate::resolver::ResolvedField;

use super::policy::{SidescrollPolicy, TRAILING_FROZEN_COLUMNS};

/// Frozen placement of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrozenZone {
    None,
    FrozenLeading,
    FrozenTrailing,
}

pub const FROZEN_CLASS: &str = "ra-sidescroll-frozen";
pub const FROZEN_LAST_CLASS: &str = "ra-sidescroll-frozen-last";

/// What a column shows
#[derive(Debug, Clone)]
pub enum Column {
    /// Synthetic bulk-selection column
    Checkbox,
    Field(ResolvedField),
}

/// A column with its frozen placement
#[derive(Debug, Clone)]
pub struct LayoutField {
    pub column: Column,
    pub frozen_zone: FrozenZone,
}

impl LayoutField {
    pub fn field(&self) -> Option<&ResolvedField> {
        match &self.column {
            Column::Field(field) => Some(field),
            Column::Checkbox => None,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self.column, Column::Checkbox)
    }
}

/// Columns of one list table plus the metadata the renderer needs
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    fields: Vec<LayoutField>,
    policy: SidescrollPolicy,
    frozen_leading: usize,
    frozen_trailing: usize,
}

impl LayoutPlan {
    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    pub fn policy(&self) -> SidescrollPolicy {
        self.policy
    }

    pub fn has_checkbox_column(&self) -> bool {
        self.fields.first().map_or(false, LayoutField::is_checkbox)
    }

    /// Resolved fields in column order, without the checkbox column
    pub fn resolved_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter_map(LayoutField::field)
    }

    pub fn frozen_leading(&self) -> usize {
        self.frozen_leading
    }

    pub fn frozen_trailing(&self) -> usize {
        self.frozen_trailing
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen_leading + self.frozen_trailing
    }

    /// Table wrapper gets `ra-sidescroll-table` whenever a policy is set
    pub fn is_sidescroll_table(&self) -> bool {
        !self.policy.is_off()
    }

    /// Frozen columns (and the `ra-sidescroll` marker) only with leading > 0
    pub fn is_sidescroll_active(&self) -> bool {
        !self.policy.is_off() && self.frozen_leading > 0
    }

    /// Frozen-zone classes of every cell in column `index`
    pub fn frozen_classes(&self, index: usize) -> &'static [&'static str] {
        match self.fields.get(index).map(|f| f.frozen_zone) {
            Some(FrozenZone::FrozenLeading) if index + 1 == self.frozen_leading => {
                &[FROZEN_CLASS, FROZEN_LAST_CLASS]
            }
            Some(FrozenZone::FrozenLeading) => &[FROZEN_CLASS],
            _ => &[],
        }
    }

    /// Classes of the element wrapping the table
    pub fn wrapper_class(&self) -> &'static str {
        if self.is_sidescroll_table() {
            "table-wrapper ra-sidescroll-table"
        } else {
            "table-wrapper"
        }
    }

    /// Classes of the table element
    pub fn table_class(&self) -> &'static str {
        if self.is_sidescroll_active() {
            "table table-condensed table-striped ra-sidescroll"
        } else {
            "table table-condensed table-striped"
        }
    }

    /// Serializable snapshot
    pub fn to_view(&self) -> LayoutPlanView {
        LayoutPlanView {
            policy: self.policy.to_string(),
            sidescroll_table: self.is_sidescroll_table(),
            sidescroll_active: self.is_sidescroll_active(),
            frozen_leading: self.frozen_leading,
            frozen_trailing: self.frozen_trailing,
            columns: self
                .fields
                .iter()
                .map(|f| LayoutColumnView {
                    name: f.field().map(|r| r.name().to_string()),
                    label: f.field().map(|r| r.label().to_string()),
                    checkbox: f.is_checkbox(),
                    frozen_zone: f.frozen_zone,
                })
                .collect(),
        }
    }
}

/// JSON form of a layout plan
#[derive(Debug, Clone, Serialize)]
pub struct LayoutPlanView {
    pub policy: String,
    pub sidescroll_table: bool,
    pub sidescroll_active: bool,
    pub frozen_leading: usize,
    pub frozen_trailing: usize,
    pub columns: Vec<LayoutColumnView>,
}

/// JSON form of one planned column
#[derive(Debug, Clone, Serialize)]
pub struct LayoutColumnView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub checkbox: bool,
    pub frozen_zone: FrozenZone,
}

/// Assigns frozen zones to list columns
pub struct LayoutPlanner;

impl LayoutPlanner {
    pub fn plan<I>(fields: I, policy: SidescrollPolicy, has_checkbox_column: bool) -> LayoutPlan
    where
        I: IntoIterator<Item = ResolvedField>,
    {
        let mut columns: Vec<LayoutField> = Vec::new();
        if has_checkbox_column {
            columns.push(LayoutField {
                column: Column::Checkbox,
                frozen_zone: FrozenZone::None,
            });
        }
        columns.extend(fields.into_iter().map(|field| LayoutField {
            column: Column::Field(field),
            frozen_zone: FrozenZone::None,
        }));

        let total = columns.len();
        let leading = policy.leading_columns(has_checkbox_column).min(total);
        let trailing = if leading == 0 {
            0
        } else {
            TRAILING_FROZEN_COLUMNS.min(total - leading)
        };

        for column in &mut columns[..leading] {
            column.frozen_zone = FrozenZone::FrozenLeading;
        }
        for column in &mut columns[total - trailing..] {
            column.frozen_zone = FrozenZone::FrozenTrailing;
        }

        LayoutPlan {
            fields: columns,
            policy,
            frozen_leading: leading,
            frozen_trailing: trailing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, SemanticType};
    use crate::resolver::Resolver;
    use crate::rules::RuleSet;

    fn fields(count: usize) -> Vec<ResolvedField> {
        let descriptors: Vec<_> = (0..count)
            .map(|i| FieldDescriptor::new(format!("f{}", i), SemanticType::String, format!("F{}", i)))
            .collect();
        Resolver::for_model("Wide")
            .resolve(&descriptors, &RuleSet::new())
            .unwrap()
    }

    fn zones(plan: &LayoutPlan) -> Vec<FrozenZone> {
        plan.fields().iter().map(|f| f.frozen_zone).collect()
    }

    fn count(plan: &LayoutPlan, zone: FrozenZone) -> usize {
        plan.fields().iter().filter(|f| f.frozen_zone == zone).count()
    }

    #[test]
    fn test_off_freezes_nothing() {
        let plan = LayoutPlanner::plan(fields(5), SidescrollPolicy::Off, true);
        assert_eq!(plan.fields().len(), 6);
        assert!(plan.fields()[0].is_checkbox());
        assert!(zones(&plan).iter().all(|z| *z == FrozenZone::None));
        assert_eq!(plan.frozen_count(), 0);
        assert_eq!(plan.wrapper_class(), "table-wrapper");
        assert!(!plan.is_sidescroll_active());
    }

    #[test]
    fn test_on_with_checkbox() {
        let plan = LayoutPlanner::plan(fields(10), SidescrollPolicy::on(), true);
        assert_eq!(count(&plan, FrozenZone::FrozenLeading), 3);
        assert_eq!(count(&plan, FrozenZone::FrozenTrailing), 4);
        assert_eq!(plan.frozen_count(), 7);
        assert_eq!(plan.fields()[0].frozen_zone, FrozenZone::FrozenLeading);
        assert_eq!(plan.fields()[3].frozen_zone, FrozenZone::None);
        assert_eq!(plan.fields()[10].frozen_zone, FrozenZone::FrozenTrailing);
        assert_eq!(plan.wrapper_class(), "table-wrapper ra-sidescroll-table");
        assert!(plan.table_class().ends_with("ra-sidescroll"));
    }

    #[test]
    fn test_frozen_classes_mark_end_of_leading_zone() {
        let plan = LayoutPlanner::plan(fields(10), SidescrollPolicy::on(), true);
        assert_eq!(plan.frozen_classes(0), [FROZEN_CLASS]);
        assert_eq!(plan.frozen_classes(2), [FROZEN_CLASS, FROZEN_LAST_CLASS]);
        assert!(plan.frozen_classes(3).is_empty());
        assert!(plan.frozen_classes(10).is_empty());
        assert!(plan.frozen_classes(11).is_empty());

        let off = LayoutPlanner::plan(fields(3), SidescrollPolicy::Off, true);
        assert!((0..4).all(|i| off.frozen_classes(i).is_empty()));
    }

    #[test]
    fn test_on_without_checkbox_freezes_one_less() {
        let plan = LayoutPlanner::plan(fields(10), SidescrollPolicy::on(), false);
        assert_eq!(plan.frozen_leading(), 2);
        assert_eq!(plan.frozen_trailing(), 4);
    }

    #[test]
    fn test_narrow_table_zones_do_not_overlap() {
        let plan = LayoutPlanner::plan(fields(4), SidescrollPolicy::on(), true);
        assert_eq!(
            zones(&plan),
            [
                FrozenZone::FrozenLeading,
                FrozenZone::FrozenLeading,
                FrozenZone::FrozenLeading,
                FrozenZone::FrozenTrailing,
                FrozenZone::FrozenTrailing,
            ]
        );

        let tiny = LayoutPlanner::plan(fields(1), SidescrollPolicy::custom(5), true);
        assert_eq!(tiny.frozen_leading(), 2);
        assert_eq!(tiny.frozen_trailing(), 0);
    }

    #[test]
    fn test_zero_leading_marks_table_only() {
        let plan = LayoutPlanner::plan(fields(10), SidescrollPolicy::custom(0), true);
        assert_eq!(plan.frozen_count(), 0);
        assert!(zones(&plan).iter().all(|z| *z == FrozenZone::None));
        assert!(plan.is_sidescroll_table());
        assert!(!plan.is_sidescroll_active());
        assert_eq!(plan.wrapper_class(), "table-wrapper ra-sidescroll-table");
        assert!(!plan.table_class().contains("ra-sidescroll"));
    }

    #[test]
    fn test_toggling_off_keeps_order() {
        let on = LayoutPlanner::plan(fields(8), SidescrollPolicy::on(), true);
        let off = LayoutPlanner::plan(fields(8), SidescrollPolicy::Off, true);
        let on_names: Vec<_> = on.resolved_fields().map(|f| f.name()).collect();
        let off_names: Vec<_> = off.resolved_fields().map(|f| f.name()).collect();
        assert_eq!(on_names, off_names);
        assert_eq!(off.frozen_count(), 0);
    }

    #[test]
    fn test_empty_table() {
        let plan = LayoutPlanner::plan(Vec::new(), SidescrollPolicy::on(), false);
        assert!(plan.fields().is_empty());
        assert_eq!(plan.frozen_count(), 0);
    }

    #[test]
    fn test_view_serializes_zones() {
        let plan = LayoutPlanner::plan(fields(2), SidescrollPolicy::custom(1), true);
        let json = serde_json::to_value(plan.to_view()).unwrap();
        assert_eq!(json["columns"][0]["checkbox"], true);
        assert_eq!(json["columns"][0]["frozen_zone"], "frozen_leading");
        assert_eq!(json["columns"][2]["frozen_zone"], "frozen_trailing");
        assert_eq!(json["policy"], "custom(1)");
    }
}
