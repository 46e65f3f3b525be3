//! In-memory model catalog loaded from a JSON file
//!
//! ```json
//! {
//!   "models": [
//!     {
//!       "name": "Fan",
//!       "labels": { "name": "Their Name" },
//!       "attributes": [
//!         { "name": "id", "type": "integer" },
//!         { "name": "name", "type": "string" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Stands in for ORM introspection: attribute order in the file is the
//! introspection order, and `labels` overrides the humanized attribute name.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{AdminError, AdminResult};

use super::provider::{humanize, LabelProvider, ModelProvider};
use super::types::RawAttribute;

/// One model as written in the catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub attributes: Vec<RawAttribute>,
}

impl ModelEntry {
    pub fn new(name: impl Into<String>, attributes: Vec<RawAttribute>) -> Self {
        Self {
            name: name.into(),
            labels: HashMap::new(),
            attributes,
        }
    }

    /// Set the label of one attribute
    pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    fn validate(&self) -> AdminResult<()> {
        let mut seen = HashSet::new();
        for attribute in &self.attributes {
            if !seen.insert(attribute.name.as_str()) {
                return Err(AdminError::invalid_config(format!(
                    "model '{}' declares attribute '{}' twice",
                    self.name, attribute.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    models: Vec<ModelEntry>,
}

/// Model catalog acting as both model provider and label provider.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<ModelEntry>,
    index: HashMap<String, usize>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog file.
    pub fn load(path: &Path) -> AdminResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AdminError::invalid_config(format!(
                "Failed to read model catalog '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(content: &str) -> AdminResult<Self> {
        let file: CatalogFile = serde_json::from_str(content)
            .map_err(|e| AdminError::invalid_config(format!("Invalid model catalog JSON: {}", e)))?;

        let mut catalog = Self::new();
        for model in file.models {
            catalog.register(model)?;
        }
        Ok(catalog)
    }

    /// Registers a model. Names must be unique.
    pub fn register(&mut self, model: ModelEntry) -> AdminResult<()> {
        model.validate()?;
        if self.index.contains_key(&model.name) {
            return Err(AdminError::invalid_config(format!(
                "model '{}' registered twice",
                model.name
            )));
        }
        self.index.insert(model.name.clone(), self.models.len());
        self.models.push(model);
        Ok(())
    }

    /// Gets a model by name.
    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.index.get(name).map(|&i| &self.models[i])
    }

    /// Returns the number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelProvider for ModelCatalog {
    fn attributes(&self, model: &str) -> AdminResult<Vec<RawAttribute>> {
        self.get(model)
            .map(|entry| entry.attributes.clone())
            .ok_or_else(|| AdminError::UnknownModel(model.to_string()))
    }

    fn model_names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }
}

impl LabelProvider for ModelCatalog {
    fn label_for(&self, model: &str, field: &str) -> String {
        self.get(model)
            .and_then(|entry| entry.labels.get(field).cloned())
            .unwrap_or_else(|| humanize(field))
    }
}
