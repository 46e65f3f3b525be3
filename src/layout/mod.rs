//! List layout: sidescroll policy and frozen-column planning

mod planner;
mod policy;

pub use planner::{
    Column, FrozenZone, LayoutColumnView, LayoutField, LayoutPlan, LayoutPlanView, LayoutPlanner,
};
pub use policy::{SidescrollPolicy, DEFAULT_FROZEN_COLUMNS, TRAILING_FROZEN_COLUMNS};
