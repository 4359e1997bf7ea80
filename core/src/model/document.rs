//! # Documents
//!
//! The Parsed Document Tree produced by the parser and consumed by the
//! organizer, and the Optimized Document produced by the optimizer.

use super::components::Components;
use super::declarations::{Callback, Parameter, RefOr};
use super::operations::{HttpMethod, Path, SecurityRequirement, Tag};
use super::schema::{ReferenceNode, SchemaNode};
use indexmap::IndexMap;
use serde::Serialize;

/// A parsed OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// `info.title`
    pub title: String,
    /// `info.x-api-name`, else the PascalCase title.
    pub api_name: String,
    /// `info.description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `info.version`
    pub version: String,
    /// The component table.
    pub components: Components,
    /// `paths`, in document order.
    pub paths: Vec<Path>,
    /// `tags`, in document order.
    pub tags: Vec<Tag>,
    /// Document-level `security`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

/// Per-location parameter groups of one operation, each a reference to a
/// hoisted object model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterGroups {
    /// `in: path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<SchemaNode>,
    /// `in: query`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<SchemaNode>,
    /// `in: header`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<SchemaNode>,
    /// `in: cookie`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<SchemaNode>,
}

/// An operation after globalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedOperation {
    /// HTTP method.
    pub method: HttpMethod,
    /// Base name used for every fragment hoisted out of this operation.
    pub name: String,
    /// `operationId`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// `tags`
    pub tags: Vec<String>,
    /// `summary`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `deprecated`
    pub deprecated: bool,
    /// Path-item and operation parameters merged, operation entries winning.
    pub parameters: Vec<RefOr<Parameter>>,
    /// Hoisted per-location groups.
    pub parameter_groups: ParameterGroups,
    /// Reference to the hoisted (or user-declared) request body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<ReferenceNode>,
    /// Status -> reference to the hoisted (or user-declared) response.
    pub responses: IndexMap<String, ReferenceNode>,
    /// `callbacks`, passed through.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, RefOr<Callback>>,
    /// Effective `security` (operation-level, else document-level).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

/// A path item after globalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPathItem {
    /// `summary`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operations in method order.
    pub operations: Vec<OptimizedOperation>,
}

/// A path after globalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPath {
    /// The path template.
    pub name: String,
    /// Inline item, or the untouched reference to a path item component.
    pub item: RefOr<OptimizedPathItem>,
}

/// The hoisted, deduplicated document handed to code generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedDocument {
    /// `info.title`
    pub title: String,
    /// API name.
    pub api_name: String,
    /// `info.description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `info.version`
    pub version: String,
    /// User components plus every hoisted fragment.
    pub components: Components,
    /// Paths, in source order.
    pub paths: Vec<OptimizedPath>,
    /// Tags, in source order.
    pub tags: Vec<Tag>,
    /// Document-level `security`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}
