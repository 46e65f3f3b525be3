//! Observability for configuration loading, resolution and rendering
//!
//! - Structured JSON-lines logging on stderr
//! - Typed lifecycle events
//! - Begin/complete scopes
//!
//! Observability is read-only: nothing here changes what gets resolved or
//! rendered, and a failed log write is ignored.
//!
//! ```ignore
//! use adminlist::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RegistryLoaded, &[("models", "3")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

fn severity_of(event: Event) -> Severity {
    if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
