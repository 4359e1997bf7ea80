#![deny(missing_docs)]

//! # Dialects
//!
//! The 3.0 and 3.1 parser variants share every parsing routine and differ
//! only in the feature switches below. A construct that the active dialect
//! does not define is still parsed, with a warning; boolean schemas are the
//! exception and are rejected outside 3.1.

use crate::diagnostics::{warn, DiagnosticSink};
use crate::error::{AppError, AppResult};
use serde_json::Value;

/// Version-specific parsing switches.
pub trait Dialect {
    /// Human-readable version label used in diagnostics.
    fn version(&self) -> &'static str;

    /// `components.pathItems`
    fn path_item_components(&self) -> bool;

    /// `true` / `false` in schema position.
    fn boolean_schemas(&self) -> bool;

    /// `type: [string, "null"]`
    fn type_arrays(&self) -> bool;

    /// `const`
    fn const_keyword(&self) -> bool;

    /// `nullable: true`
    fn nullable_keyword(&self) -> bool;

    /// `exclusiveMinimum: 5` rather than `exclusiveMinimum: true`.
    fn numeric_exclusive_bounds(&self) -> bool;

    /// The `mutualTLS` security scheme type.
    fn mutual_tls(&self) -> bool;
}

/// OpenAPI 3.0.x
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApi30;

/// OpenAPI 3.1.x
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApi31;

impl Dialect for OpenApi30 {
    fn version(&self) -> &'static str {
        "3.0"
    }
    fn path_item_components(&self) -> bool {
        false
    }
    fn boolean_schemas(&self) -> bool {
        false
    }
    fn type_arrays(&self) -> bool {
        false
    }
    fn const_keyword(&self) -> bool {
        false
    }
    fn nullable_keyword(&self) -> bool {
        true
    }
    fn numeric_exclusive_bounds(&self) -> bool {
        false
    }
    fn mutual_tls(&self) -> bool {
        false
    }
}

impl Dialect for OpenApi31 {
    fn version(&self) -> &'static str {
        "3.1"
    }
    fn path_item_components(&self) -> bool {
        true
    }
    fn boolean_schemas(&self) -> bool {
        true
    }
    fn type_arrays(&self) -> bool {
        true
    }
    fn const_keyword(&self) -> bool {
        true
    }
    fn nullable_keyword(&self) -> bool {
        false
    }
    fn numeric_exclusive_bounds(&self) -> bool {
        true
    }
    fn mutual_tls(&self) -> bool {
        true
    }
}

/// Picks the dialect from the root `openapi` / `swagger` field.
///
/// Swagger 2.x, a missing version and any major version other than 3 are
/// fatal. Minor versions above 3.1 parse with the 3.1 rules and a warning.
pub fn select_dialect(root: &Value, sink: &dyn DiagnosticSink) -> AppResult<Box<dyn Dialect>> {
    if let Some(swagger) = root.get("swagger") {
        return Err(AppError::UnsupportedVersion(format!(
            "Swagger {} documents are not supported",
            display_version(swagger)
        )));
    }
    let Some(raw) = root.get("openapi") else {
        return Err(AppError::UnsupportedVersion(
            "missing 'openapi' version field".to_string(),
        ));
    };
    let version = display_version(raw);

    let mut parts = version.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().and_then(|m| m.parse::<u32>().ok());

    match (major, minor) {
        ("3", Some(0)) => Ok(Box::new(OpenApi30)),
        ("3", Some(1)) => Ok(Box::new(OpenApi31)),
        ("3", Some(_)) => {
            warn(
                sink,
                "#/openapi",
                format!("OpenAPI {} is newer than 3.1, parsing with 3.1 rules", version),
            );
            Ok(Box::new(OpenApi31))
        }
        _ => Err(AppError::UnsupportedVersion(format!(
            "OpenAPI {} is not supported",
            version
        ))),
    }
}

fn display_version(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
