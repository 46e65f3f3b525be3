//! Sidescroll policy

use std::fmt;

/// Frozen leading columns when sidescroll is switched on without a count
pub const DEFAULT_FROZEN_COLUMNS: usize = 3;

/// Width of the frozen zone at the end of a sidescrolling table
pub const TRAILING_FROZEN_COLUMNS: usize = 4;

/// Horizontal-scroll behavior of one list table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidescrollPolicy {
    #[default]
    Off,
    /// Switched on with a default column count. The count includes the
    /// checkbox slot, so a table without checkboxes freezes one column fewer.
    On(usize),
    /// Exactly this many leading columns, checkbox included when present
    Custom(usize),
}

impl SidescrollPolicy {
    /// Sidescroll on with the default column count
    pub fn on() -> Self {
        SidescrollPolicy::On(DEFAULT_FROZEN_COLUMNS)
    }

    pub fn custom(num_frozen_columns: usize) -> Self {
        SidescrollPolicy::Custom(num_frozen_columns)
    }

    pub fn is_off(&self) -> bool {
        matches!(self, SidescrollPolicy::Off)
    }

    /// Leading columns to freeze, before clamping to the table width
    pub fn leading_columns(&self, has_checkbox_column: bool) -> usize {
        match *self {
            SidescrollPolicy::Off => 0,
            SidescrollPolicy::On(n) if has_checkbox_column => n,
            SidescrollPolicy::On(n) => n.saturating_sub(1),
            SidescrollPolicy::Custom(n) => n,
        }
    }

    /// Model override, else global default, else `Off`
    pub fn resolve(model: Option<SidescrollPolicy>, global: Option<SidescrollPolicy>) -> Self {
        model.or(global).unwrap_or_default()
    }
}

impl fmt::Display for SidescrollPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SidescrollPolicy::Off => write!(f, "off"),
            SidescrollPolicy::On(n) => write!(f, "on({})", n),
            SidescrollPolicy::Custom(n) => write!(f, "custom({})", n),
        }
    }
}
