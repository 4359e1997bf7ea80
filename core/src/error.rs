//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the pipeline.
//!
//! Only conditions that abort a whole document are errors. Everything the
//! pipeline can recover from is reported through a
//! [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) instead.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A schema whose shape matches no known node variant.
    #[from(ignore)]
    #[display("Unrecognized schema at '{pointer}': {reason}")]
    UnrecognizedSchema {
        /// JSON Pointer of the offending schema inside the source document.
        pointer: String,
        /// Human readable reason.
        reason: String,
    },

    /// The document declares an OpenAPI/Swagger version this crate does not parse.
    #[from(ignore)]
    #[display("Unsupported document version: {_0}")]
    UnsupportedVersion(String),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML deserialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Shorthand for [`AppError::UnrecognizedSchema`].
    pub fn unrecognized(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::UnrecognizedSchema {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
