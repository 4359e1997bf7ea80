//! # Options
//!
//! Knobs for the parser and optimizer. Loading them from a file is the
//! caller's business; both structs deserialize from YAML/JSON with every
//! field optional.

use serde::Deserialize;

/// Parser behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Compute the read/write omission view for request and response content.
    pub omit_read_write: bool,
    /// Warn about operations without tags.
    pub require_tags: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            omit_read_write: true,
            require_tags: true,
        }
    }
}

/// Optimizer behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerOptions {
    /// Deduplicate the models section by reference name.
    pub dedupe_models: bool,
    /// Number of hex digits of the content hash used in generated names.
    pub hash_length: usize,
    /// Hoist structural inline schemas found in request and response bodies.
    pub hoist_body_schemas: bool,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            dedupe_models: false,
            hash_length: 8,
            hoist_body_schemas: true,
        }
    }
}
