//! Admin list configuration registry
//!
//! Configuration is built once, either through the DSL (`RegistryBuilder`) or
//! from a JSON file (`AdminConfig`), and frozen into an immutable `Registry`.
//! Global rules apply to every model and run before the model's own rules.

mod config;
mod dsl;
#[allow(clippy::module_inception)]
mod registry;
mod shared;

pub use config::{
    validate_strftime, AdminConfig, PredicateConfig, RuleConfig, SectionConfig,
    SidescrollSetting, ValueFormatConfig,
};
pub use dsl::{ListOptions, ListSection, RegistryBuilder};
pub use registry::{
    ListSettings, Registry, SortSpec, DEFAULT_ITEMS_PER_PAGE, DEFAULT_SORT_FIELD,
};
pub use shared::SharedRegistry;
