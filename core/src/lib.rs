#![deny(missing_docs)]

//! # Specgen Core
//!
//! OpenAPI 3.0 / 3.1 documents to a normalized, reference-addressable
//! intermediate model for code generators.
//!
//! The pipeline has three stages, each a pure function over in-memory data:
//!
//! 1. [`parse_document`] turns a raw document into a Parsed Document Tree.
//! 2. [`organize_by_tags`] splits that tree into one sub-document per tag.
//! 3. [`optimize`] hoists per-operation fragments into the component table.
//!
//! Recoverable problems go to a caller-supplied [`DiagnosticSink`]; only
//! unrecognized schema shapes and unsupported versions abort a document.

/// Shared error types.
pub mod error;

/// Severity-leveled diagnostics.
pub mod diagnostics;

/// Parser and optimizer options.
pub mod config;

/// The node model shared by every stage.
pub mod model;

/// Pointer grammar helpers.
pub mod ref_utils;

/// Component lookup by pointer.
pub mod resolver;

/// Read/write omission views.
pub mod omission;

/// OpenAPI (OAS) parsing.
pub mod oas;

/// Per-tag partitioning.
pub mod organizer;

/// Hoisting, collapsing and deduplication.
pub mod optimizer;

/// Pointer -> emitted name table for rendering stages.
pub mod registry;

pub use config::{OptimizerOptions, ParserOptions};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};
pub use error::{AppError, AppResult};
pub use model::{Document, OptimizedDocument};
pub use oas::{parse_document, parse_json, parse_yaml};
pub use optimizer::{optimize, optimize_with_hasher, FragmentHasher, Sha256Hasher};
pub use organizer::organize_by_tags;
pub use registry::ReferenceRegistry;
pub use resolver::find;
