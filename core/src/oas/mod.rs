#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! Raw OpenAPI 3.0 / 3.1 document -> Parsed Document Tree.
//!
//! - **dialect**: version detection and the per-version feature switches.
//! - **naming**: identifier derivation from titles, operation ids and paths.
//! - the remaining submodules hold one family of parsing routines each,
//!   all implemented on the shared [`Parser`].

pub mod dialect;
pub mod naming;

mod bodies;
mod components;
mod fields;
mod media;
mod normalization;
mod params;
mod routes;
mod schemas;
mod security;

pub use dialect::{select_dialect, Dialect, OpenApi30, OpenApi31};

use crate::config::ParserOptions;
use crate::diagnostics::{warn, Diagnostic, DiagnosticSink, Severity};
use crate::error::{AppError, AppResult};
use crate::model::{Components, Document, Path, Tag};
use naming::to_pascal_case;
use serde_json::Value;

/// Parses an OpenAPI document from YAML text.
pub fn parse_yaml(
    yaml_content: &str,
    options: &ParserOptions,
    sink: &dyn DiagnosticSink,
) -> AppResult<Document> {
    let raw: Value = serde_yaml::from_str(yaml_content)?;
    parse_document(&raw, options, sink)
}

/// Parses an OpenAPI document from JSON text.
pub fn parse_json(
    json_content: &str,
    options: &ParserOptions,
    sink: &dyn DiagnosticSink,
) -> AppResult<Document> {
    let raw: Value = serde_json::from_str(json_content)?;
    parse_document(&raw, options, sink)
}

/// Parses an in-memory OpenAPI document.
///
/// Selects the dialect from the `openapi` field, then runs the shared parser.
/// Unrecognized schema shapes and unsupported versions are fatal; everything
/// else is reported to `sink` and parsed best-effort.
pub fn parse_document(
    raw: &Value,
    options: &ParserOptions,
    sink: &dyn DiagnosticSink,
) -> AppResult<Document> {
    let dialect = select_dialect(raw, sink)?;
    let document = Parser::new(dialect.as_ref(), options, sink).parse(raw)?;
    tracing::debug!(
        title = %document.title,
        paths = document.paths.len(),
        components = document.components.len(),
        "parsed OpenAPI {} document",
        dialect.version()
    );
    Ok(document)
}

/// Parsing state shared by every routine of one document.
pub(crate) struct Parser<'p> {
    dialect: &'p dyn Dialect,
    options: &'p ParserOptions,
    sink: &'p dyn DiagnosticSink,
    /// Schema components, parsed before everything else so that content
    /// parsing can resolve omission views against them.
    models: Components,
}

impl<'p> Parser<'p> {
    pub(crate) fn new(
        dialect: &'p dyn Dialect,
        options: &'p ParserOptions,
        sink: &'p dyn DiagnosticSink,
    ) -> Self {
        Self {
            dialect,
            options,
            sink,
            models: Components::default(),
        }
    }

    fn parse(mut self, raw: &Value) -> AppResult<Document> {
        let Some(root) = raw.as_object() else {
            return Err(AppError::General(
                "OpenAPI document must be a mapping".to_string(),
            ));
        };

        let info = root.get("info").and_then(Value::as_object);
        if info.is_none() {
            self.warn("#/info", "Document has no info object");
        }
        let info_field = |key: &str| info.and_then(|i| fields::string(i, key));

        let title = info_field("title").unwrap_or_else(|| {
            self.warn("#/info/title", "Document has no title");
            String::new()
        });
        let api_name = info_field("x-api-name").unwrap_or_else(|| match to_pascal_case(&title) {
            name if name.is_empty() => "Api".to_string(),
            name => name,
        });
        let version = info_field("version").unwrap_or_else(|| {
            self.warn("#/info/version", "Document has no version");
            String::new()
        });

        let raw_components = root.get("components").and_then(Value::as_object);
        self.models.models = self.parse_models(raw_components)?;
        let mut components = self.parse_components(raw_components)?;
        let paths = self.parse_paths(root.get("paths"))?;
        let tags = self.parse_tags(root.get("tags"), &paths);
        let security =
            security::parse_security_requirements(root.get("security")).unwrap_or_default();

        components.models = std::mem::take(&mut self.models.models);
        Ok(Document {
            title,
            api_name,
            description: info_field("description"),
            version,
            components,
            paths,
            tags,
            security,
        })
    }

    /// Declared tags, followed by tags that operations use without declaring.
    fn parse_tags(&self, value: Option<&Value>, paths: &[Path]) -> Vec<Tag> {
        let mut tags: Vec<Tag> = value
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|t| {
                        Some(Tag {
                            name: fields::string(t, "name")?,
                            description: fields::string(t, "description"),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let used = paths
            .iter()
            .filter_map(|p| p.item.as_item())
            .flat_map(|item| item.operations.iter())
            .flat_map(|op| op.tags.iter());
        for name in used {
            if !tags.iter().any(|t| &t.name == name) {
                self.sink.report(
                    Diagnostic::new(
                        Severity::Info,
                        format!("Tag '{}' is used by an operation but not declared", name),
                    )
                    .at("#/tags"),
                );
                tags.push(Tag {
                    name: name.clone(),
                    description: None,
                });
            }
        }
        tags
    }

    fn warn(&self, at: &str, message: impl Into<String>) {
        warn(self.sink, at, message);
    }

    /// Reports a construct the active dialect does not define.
    fn dialect_feature(&self, supported: bool, at: &str, feature: &str) {
        if !supported {
            self.warn(
                at,
                format!(
                    "'{}' is not part of OpenAPI {}, parsing it anyway",
                    feature,
                    self.dialect.version()
                ),
            );
        }
    }
}
