#![deny(missing_docs)]

//! # Reference Registry
//!
//! Maps the pointer strings this crate produces to the identifiers a
//! rendering stage finally emits for them. The registry is a plain value
//! owned by whoever renders; nothing in the pipeline keeps one globally.

use crate::error::{AppError, AppResult};
use crate::model::OptimizedDocument;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Pointer -> emitted name lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceRegistry {
    names: IndexMap<String, String>,
}

impl ReferenceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds every component of `document` with its short name.
    pub fn for_document(document: &OptimizedDocument) -> Self {
        let mut registry = Self::new();
        for entry in document.components.iter() {
            registry
                .names
                .entry(entry.reference_name().to_string())
                .or_insert_with(|| entry.name().to_string());
        }
        registry
    }

    /// Records the emitted name for `pointer`.
    ///
    /// Re-registering the same name is a no-op; a different name for an
    /// already registered pointer is an error.
    pub fn register(&mut self, pointer: impl Into<String>, name: impl Into<String>) -> AppResult<()> {
        let pointer = pointer.into();
        let name = name.into();
        match self.names.get(&pointer) {
            Some(existing) if *existing == name => Ok(()),
            Some(existing) => Err(AppError::General(format!(
                "Reference '{}' is already registered as '{}', cannot rename it to '{}'",
                pointer, existing, name
            ))),
            None => {
                self.names.insert(pointer, name);
                Ok(())
            }
        }
    }

    /// The emitted name for `pointer`.
    pub fn get(&self, pointer: &str) -> Option<&str> {
        self.names.get(pointer).map(String::as_str)
    }

    /// True when `pointer` has a name.
    pub fn contains(&self, pointer: &str) -> bool {
        self.names.contains_key(pointer)
    }

    /// Number of registered pointers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
