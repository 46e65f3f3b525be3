//! Snapshot holder for concurrent readers
//!
//! Readers take an `Arc<Registry>` snapshot and keep using it for the whole
//! request; `replace` swaps the pointer, never the registry contents.

use std::sync::{Arc, RwLock};

use crate::observability::{log_event_with_fields, Event};

use super::registry::Registry;

#[derive(Debug)]
pub struct SharedRegistry {
    current: RwLock<Arc<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Current registry. A poisoned lock still holds a complete snapshot.
    pub fn snapshot(&self) -> Arc<Registry> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in a new registry; returns the previous one
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        let models = registry.configured_models().len().to_string();
        let next = Arc::new(registry);
        let previous = match self.current.write() {
            Ok(mut guard) => std::mem::replace(&mut *guard, next),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), next),
        };
        log_event_with_fields(Event::RegistryReloaded, &[("models", &models)]);
        previous
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}
