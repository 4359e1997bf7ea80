#![deny(missing_docs)]

//! # Optimizer
//!
//! Parsed Document Tree -> Optimized Document.
//!
//! - **collapse**: single-alternative wrappers and object merging.
//! - **hoist**: moves per-operation fragments into the component table.
//! - **dedup**: first-wins deduplication by reference name.
//! - **hasher**: the content hash behind collision-free generated names.
//!
//! Every operation is globalized: its parameters are grouped per location
//! into hoisted object models, and inline request bodies and responses are
//! hoisted with references left at the call site. References into the
//! source table are followed read-only; the input document is never mutated.

pub mod collapse;
pub mod dedup;
pub mod hasher;
pub mod hoist;

pub use collapse::{collapse, merge_objects};
pub use hasher::{FragmentHasher, Sha256Hasher};

use crate::config::OptimizerOptions;
use crate::diagnostics::{debug, DiagnosticSink};
use crate::error::{AppError, AppResult};
use crate::model::{
    CompositeNode, Components, Document, ObjectNode, Operation, OptimizedDocument,
    OptimizedOperation, OptimizedPath, OptimizedPathItem, Parameter, ParameterGroups,
    ParameterLocation, Path, PathItem, PrimitiveType, Property, RefOr, ReferenceNode, Response,
    SchemaNode, SecurityRequirement, VisitSchemasMut,
};
use crate::oas::naming::{derive_operation_name, to_pascal_case};
use crate::resolver::follow_parameter;
use collapse::collapse_in_place;
use hoist::Hoister;
use indexmap::IndexMap;

/// Longest usable hash suffix (hex digits of a SHA-256 digest).
const MAX_HASH_LENGTH: usize = 64;

/// Optimizes `document` with the default SHA-256 content hash.
pub fn optimize(
    document: &Document,
    options: &OptimizerOptions,
    sink: &dyn DiagnosticSink,
) -> AppResult<OptimizedDocument> {
    optimize_with_hasher(document, options, &Sha256Hasher, sink)
}

/// Optimizes `document`, naming colliding fragments with `hasher`.
pub fn optimize_with_hasher(
    document: &Document,
    options: &OptimizerOptions,
    hasher: &dyn FragmentHasher,
    sink: &dyn DiagnosticSink,
) -> AppResult<OptimizedDocument> {
    if options.hash_length == 0 || options.hash_length > MAX_HASH_LENGTH {
        return Err(AppError::General(format!(
            "Hash length must be between 1 and {}, got {}",
            MAX_HASH_LENGTH, options.hash_length
        )));
    }

    let mut components = document.components.clone();
    components.visit_schemas_mut(&mut collapse_in_place);

    let mut globalizer = Globalizer {
        source: &document.components,
        security: &document.security,
        options,
        sink,
        hoister: Hoister::new(components, hasher, options.hash_length, sink),
    };
    let paths: Vec<OptimizedPath> = document.paths.iter().map(|p| globalizer.path(p)).collect();

    let mut components = globalizer.hoister.into_components();
    dedup::dedupe_components(&mut components, options, sink);
    components.sort_by_name();

    tracing::debug!(
        title = %document.title,
        paths = paths.len(),
        components = components.len(),
        "optimized document"
    );

    Ok(OptimizedDocument {
        title: document.title.clone(),
        api_name: document.api_name.clone(),
        description: document.description.clone(),
        version: document.version.clone(),
        components,
        paths,
        tags: document.tags.clone(),
        security: document.security.clone(),
    })
}

struct Globalizer<'g> {
    source: &'g Components,
    security: &'g [SecurityRequirement],
    options: &'g OptimizerOptions,
    sink: &'g dyn DiagnosticSink,
    hoister: Hoister<'g>,
}

impl Globalizer<'_> {
    fn path(&mut self, path: &Path) -> OptimizedPath {
        let item = match &path.item {
            RefOr::Reference(r) => RefOr::Reference(r.clone()),
            RefOr::Item(item) => RefOr::Item(OptimizedPathItem {
                summary: item.summary.clone(),
                description: item.description.clone(),
                operations: item
                    .operations
                    .iter()
                    .map(|op| self.operation(&path.name, item, op))
                    .collect(),
            }),
        };
        OptimizedPath {
            name: path.name.clone(),
            item,
        }
    }

    fn operation(&mut self, path: &str, item: &PathItem, op: &Operation) -> OptimizedOperation {
        let name = operation_name(op, path);

        let mut parameters = self.merge_parameters(&item.parameters, &op.parameters);
        let parameter_groups = self.parameter_groups(&name, &parameters);
        for parameter in &mut parameters {
            parameter.visit_schemas_mut(&mut collapse_in_place);
        }

        let request_body = op.request_body.as_ref().map(|body| match body {
            RefOr::Reference(r) => r.clone(),
            RefOr::Item(inline) => {
                let mut inline = inline.clone();
                inline.visit_schemas_mut(&mut collapse_in_place);
                if self.options.hoist_body_schemas {
                    for media in inline.content.values_mut() {
                        self.hoist_body_schema(&mut media.definition, &format!("{}Request", name));
                    }
                }
                self.hoister.hoist(
                    "requestBodies",
                    &format!("{}RequestBody", name),
                    RefOr::Item(inline),
                )
            }
        });

        let mut responses = IndexMap::new();
        for (status, response) in &op.responses {
            let reference = match response {
                RefOr::Reference(r) => r.clone(),
                RefOr::Item(inline) => self.response(&name, status, inline),
            };
            responses.insert(status.clone(), reference);
        }

        let mut callbacks = op.callbacks.clone();
        for callback in callbacks.values_mut() {
            callback.visit_schemas_mut(&mut collapse_in_place);
        }

        OptimizedOperation {
            method: op.method,
            name,
            operation_id: op.operation_id.clone(),
            tags: op.tags.clone(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated,
            parameters,
            parameter_groups,
            request_body,
            responses,
            callbacks,
            security: op
                .security
                .clone()
                .unwrap_or_else(|| self.security.to_vec()),
        }
    }

    fn response(&mut self, operation: &str, status: &str, inline: &Response) -> ReferenceNode {
        let mut inline = inline.clone();
        inline.visit_schemas_mut(&mut collapse_in_place);
        let status = to_pascal_case(status);
        if !inline.links.is_empty() {
            debug(
                self.sink,
                &format!("{}{}Response", operation, status),
                "Response links are passed through without rewriting",
            );
        }
        if self.options.hoist_body_schemas {
            let body_name = format!("{}{}ResponseBody", operation, status);
            for media in inline.content.values_mut() {
                self.hoist_body_schema(&mut media.definition, &body_name);
            }
        }
        self.hoister.hoist(
            "responses",
            &format!("{}{}Response", operation, status),
            RefOr::Item(inline),
        )
    }

    /// Replaces a structural inline media schema with a reference to a
    /// hoisted model.
    fn hoist_body_schema(&mut self, definition: &mut Option<SchemaNode>, name: &str) {
        let Some(schema) = definition.take() else {
            return;
        };
        *definition = Some(if schema.is_structural() {
            SchemaNode::Reference(self.hoister.hoist("schemas", name, schema))
        } else {
            schema
        });
    }

    /// Path-item parameters followed by the operation's; an operation
    /// parameter replaces a path-item parameter with the same name and
    /// location in place.
    fn merge_parameters(
        &self,
        inherited: &[RefOr<Parameter>],
        own: &[RefOr<Parameter>],
    ) -> Vec<RefOr<Parameter>> {
        let mut merged: Vec<RefOr<Parameter>> = inherited.to_vec();
        for parameter in own {
            let key = self.parameter_key(parameter);
            let slot = key.and_then(|key| {
                merged
                    .iter()
                    .position(|existing| self.parameter_key(existing) == Some(key))
            });
            match slot {
                Some(index) => merged[index] = parameter.clone(),
                None => merged.push(parameter.clone()),
            }
        }
        merged
    }

    fn parameter_key<'p>(
        &'p self,
        parameter: &'p RefOr<Parameter>,
    ) -> Option<(&'p str, ParameterLocation)> {
        follow_parameter(self.source, parameter, self.sink).map(|p| (p.name.as_str(), p.location))
    }

    /// One hoisted object model per location that has parameters.
    fn parameter_groups(
        &mut self,
        operation: &str,
        parameters: &[RefOr<Parameter>],
    ) -> ParameterGroups {
        let resolved: Vec<&Parameter> = parameters
            .iter()
            .filter_map(|p| follow_parameter(self.source, p, self.sink))
            .collect();

        let mut groups = ParameterGroups::default();
        for location in ParameterLocation::ALL {
            let members: Vec<SchemaNode> = resolved
                .iter()
                .filter(|p| p.location == location)
                .map(|p| parameter_object(p))
                .collect();
            if members.is_empty() {
                continue;
            }
            let group = collapse(SchemaNode::Composite(CompositeNode {
                definitions: merge_objects(members),
                modifiers: Default::default(),
            }));
            let name = format!(
                "{}{}Parameters",
                operation,
                to_pascal_case(location.as_str())
            );
            let reference = SchemaNode::Reference(self.hoister.hoist(location.as_str(), &name, group));
            let slot = match location {
                ParameterLocation::Path => &mut groups.path,
                ParameterLocation::Query => &mut groups.query,
                ParameterLocation::Header => &mut groups.header,
                ParameterLocation::Cookie => &mut groups.cookie,
            };
            *slot = Some(reference);
        }
        groups
    }
}

/// PascalCase `operationId`, else a name derived from method and path.
fn operation_name(op: &Operation, path: &str) -> String {
    op.operation_id
        .as_deref()
        .map(to_pascal_case)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| derive_operation_name(op.method, path))
}

/// A single-property object standing for one parameter.
fn parameter_object(parameter: &Parameter) -> SchemaNode {
    let definition = parameter
        .value_definition()
        .cloned()
        .map(collapse)
        .unwrap_or_else(|| SchemaNode::primitive(PrimitiveType::Void));
    SchemaNode::Object(ObjectNode {
        properties: vec![Property {
            name: parameter.name.clone(),
            required: parameter.required,
            description: parameter.description.clone(),
            definition,
        }],
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserOptions;
    use crate::diagnostics::CollectingSink;
    use crate::model::{ComponentRef, HttpMethod, Section};
    use crate::oas::parse_yaml;
    use crate::resolver::find;
    use std::collections::HashSet;

    const SHOP: &str = r#"
openapi: 3.0.3
info:
  title: Shop
  version: 1.0.0
tags:
  - name: orders
paths:
  /orders/{orderId}:
    parameters:
      - name: orderId
        in: path
        required: true
        schema:
          type: string
      - name: verbose
        in: query
        schema:
          type: boolean
    get:
      tags: [orders]
      operationId: get_order
      parameters:
        - name: verbose
          in: query
          schema:
            type: integer
        - $ref: '#/components/parameters/Trace'
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: object
                properties:
                  id:
                    type: string
                    readOnly: true
        '404':
          $ref: '#/components/responses/NotFound'
    put:
      tags: [orders]
      requestBody:
        content:
          application/json:
            schema:
              allOf:
                - $ref: '#/components/schemas/Order'
      responses:
        default:
          description: Done
components:
  parameters:
    Trace:
      name: X-Trace
      in: header
      schema:
        type: string
  responses:
    NotFound:
      description: Missing
  schemas:
    Order:
      type: object
      properties:
        id:
          type: string
"#;

    fn optimized() -> (OptimizedDocument, CollectingSink) {
        let sink = CollectingSink::new();
        let doc = parse_yaml(SHOP, &ParserOptions::default(), &sink).unwrap();
        let optimized = optimize(&doc, &OptimizerOptions::default(), &sink).unwrap();
        (optimized, sink)
    }

    fn operation(doc: &OptimizedDocument, method: HttpMethod) -> &OptimizedOperation {
        doc.paths[0]
            .item
            .as_item()
            .unwrap()
            .operations
            .iter()
            .find(|op| op.method == method)
            .unwrap()
    }

    fn model<'a>(doc: &'a OptimizedDocument, node: &SchemaNode, sink: &CollectingSink) -> &'a SchemaNode {
        let pointer = &node.as_reference().unwrap().pointer;
        match find(&doc.components, pointer, sink) {
            Some(ComponentRef::Model(c)) => &c.definition,
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn test_operation_names() {
        let (doc, _) = optimized();
        assert_eq!(operation(&doc, HttpMethod::Get).name, "GetOrder");
        assert_eq!(operation(&doc, HttpMethod::Put).name, "PutOrdersOrderId");
    }

    #[test]
    fn test_operation_parameter_overrides_path_item_parameter() {
        let (doc, sink) = optimized();
        let get = operation(&doc, HttpMethod::Get);
        assert_eq!(get.parameters.len(), 3);

        let query = model(&doc, get.parameter_groups.query.as_ref().unwrap(), &sink);
        let verbose = &query.as_object().unwrap().properties[0];
        assert_eq!(verbose.name, "verbose");
        assert_eq!(verbose.definition, SchemaNode::primitive(PrimitiveType::Integer));
    }

    #[test]
    fn test_parameter_groups_are_hoisted_per_location() {
        let (doc, sink) = optimized();
        let get = operation(&doc, HttpMethod::Get);
        let path = get.parameter_groups.path.as_ref().unwrap();
        assert_eq!(
            path.as_reference().unwrap().pointer,
            "#/components/generated/path/GetOrderPathParameters"
        );
        let header = model(&doc, get.parameter_groups.header.as_ref().unwrap(), &sink);
        assert_eq!(header.as_object().unwrap().properties[0].name, "X-Trace");
        assert!(get.parameter_groups.cookie.is_none());
    }

    #[test]
    fn test_bodies_and_responses_are_hoisted() {
        let (doc, sink) = optimized();
        let get = operation(&doc, HttpMethod::Get);
        assert_eq!(
            get.responses["200"].pointer,
            "#/components/generated/responses/GetOrder200Response"
        );
        assert_eq!(get.responses["404"].pointer, "#/components/responses/NotFound");
        assert!(doc
            .components
            .contains("#/components/generated/schemas/GetOrder200ResponseBody"));

        let put = operation(&doc, HttpMethod::Put);
        let body = put.request_body.as_ref().unwrap();
        assert_eq!(
            body.pointer,
            "#/components/generated/requestBodies/PutOrdersOrderIdRequestBody"
        );
        let Some(ComponentRef::RequestBody(c)) = find(&doc.components, &body.pointer, &sink) else {
            panic!("request body not hoisted");
        };
        let media = &c.definition.as_item().unwrap().content["application/json"];
        // The single-member allOf collapsed to the reference, which is not hoisted again.
        assert_eq!(
            media.definition,
            Some(SchemaNode::reference("#/components/schemas/Order"))
        );
    }

    #[test]
    fn test_output_is_sorted_and_unique() {
        let (doc, _) = optimized();
        for section in Section::ALL {
            let names: Vec<&str> = doc.components.section(section).map(|c| c.name()).collect();
            let mut sorted = names.clone();
            sorted.sort();
            assert_eq!(names, sorted);
            let pointers: HashSet<&str> = doc
                .components
                .section(section)
                .map(|c| c.reference_name())
                .collect();
            assert_eq!(pointers.len(), names.len());
            let unique_names: HashSet<&str> = names.iter().copied().collect();
            assert_eq!(unique_names.len(), names.len());
        }
    }

    #[test]
    fn test_generated_group_does_not_reuse_a_user_model_name() {
        let source = r#"
openapi: 3.1.0
info:
  title: Clash
  version: 1.0.0
paths:
  /x:
    get:
      tags: [x]
      operationId: getX
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
      responses:
        '204':
          description: Empty
components:
  schemas:
    GetXQueryParameters:
      type: string
"#;
        let sink = CollectingSink::new();
        let doc = parse_yaml(source, &ParserOptions::default(), &sink).unwrap();
        let optimized = optimize(&doc, &OptimizerOptions::default(), &sink).unwrap();

        let names: Vec<&str> = optimized
            .components
            .models
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), 2);
        assert_eq!(unique.len(), 2);

        let get = &optimized.paths[0].item.as_item().unwrap().operations[0];
        let query = get.parameter_groups.query.as_ref().unwrap();
        let group = model(&optimized, query, &sink);
        assert_eq!(group.as_object().unwrap().properties[0].name, "limit");
        assert!(optimized.components.contains("#/components/schemas/GetXQueryParameters"));
    }

    #[test]
    fn test_invalid_hash_length_is_rejected() {
        let sink = CollectingSink::new();
        let doc = parse_yaml(SHOP, &ParserOptions::default(), &sink).unwrap();
        let options = OptimizerOptions {
            hash_length: 0,
            ..Default::default()
        };
        assert!(matches!(
            optimize(&doc, &options, &sink),
            Err(AppError::General(_))
        ));
    }

    #[test]
    fn test_input_document_is_untouched() {
        let sink = CollectingSink::new();
        let doc = parse_yaml(SHOP, &ParserOptions::default(), &sink).unwrap();
        let before = doc.clone();
        optimize(&doc, &OptimizerOptions::default(), &sink).unwrap();
        assert_eq!(doc, before);
    }
}
