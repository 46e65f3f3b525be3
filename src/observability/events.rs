//! Observable events emitted while configuring and rendering list views

use std::fmt;

/// Lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Admin configuration file parsed and turned into a registry
    RegistryLoaded,
    /// Registry snapshot swapped for a new one
    RegistryReloaded,
    /// Model catalog loaded
    ModelsLoaded,

    // Layout and rendering
    /// Frozen-column layout assigned
    LayoutPlanned,
    /// Table markup produced
    RenderComplete,
    /// A cell formatter failed
    RenderFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RegistryLoaded => "REGISTRY_LOADED",
            Event::RegistryReloaded => "REGISTRY_RELOADED",
            Event::ModelsLoaded => "MODELS_LOADED",
            Event::LayoutPlanned => "LAYOUT_PLANNED",
            Event::RenderComplete => "RENDER_COMPLETE",
            Event::RenderFailed => "RENDER_FAILED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RenderFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
