#![deny(missing_docs)]

//! # Tag Organizer
//!
//! Partitions one Parsed Document Tree into per-tag sub-documents. Each
//! sub-document keeps the paths with at least one operation tagged with its
//! tag (operations filtered down to that tag) plus the transitive closure of
//! components those paths reference.
//!
//! Path items that are bare references cannot be inspected without resolving
//! them, so they pass through to every sub-document unfiltered.

use crate::diagnostics::DiagnosticSink;
use crate::model::{
    CollectReferences, Components, Document, Path, PathItem, RefOr, SecurityRequirement, Section,
};
use crate::ref_utils::component_pointer;
use crate::resolver::find;
use std::collections::HashSet;

/// Splits `document` into one sub-document per declared tag, in tag order.
pub fn organize_by_tags(document: &Document, sink: &dyn DiagnosticSink) -> Vec<Document> {
    document
        .tags
        .iter()
        .map(|tag| {
            let paths = select_paths(&document.paths, &tag.name);
            let components = collect_closure(document, &paths, sink);
            tracing::debug!(
                tag = %tag.name,
                paths = paths.len(),
                components = components.len(),
                "organized tag"
            );
            Document {
                title: document.title.clone(),
                api_name: document.api_name.clone(),
                description: document.description.clone(),
                version: document.version.clone(),
                components,
                paths,
                tags: vec![tag.clone()],
                security: document.security.clone(),
            }
        })
        .collect()
}

/// Paths whose item carries at least one operation tagged `tag`, with the
/// other operations dropped.
fn select_paths(paths: &[Path], tag: &str) -> Vec<Path> {
    paths
        .iter()
        .filter_map(|path| match &path.item {
            RefOr::Reference(_) => Some(path.clone()),
            RefOr::Item(item) => {
                let operations: Vec<_> = item
                    .operations
                    .iter()
                    .filter(|op| op.has_tag(tag))
                    .cloned()
                    .collect();
                if operations.is_empty() {
                    return None;
                }
                Some(Path {
                    name: path.name.clone(),
                    item: RefOr::Item(PathItem {
                        summary: item.summary.clone(),
                        description: item.description.clone(),
                        operations,
                        parameters: item.parameters.clone(),
                    }),
                })
            }
        })
        .collect()
}

/// Transitive closure of every component reachable from `paths`, resolved
/// against the original document's table. The result is sorted by name.
fn collect_closure(document: &Document, paths: &[Path], sink: &dyn DiagnosticSink) -> Components {
    let mut pending: Vec<String> = Vec::new();
    for path in paths {
        path.collect_references(&mut pending);
    }
    pending.extend(security_pointers(&document.security));
    for path in paths {
        if let RefOr::Item(item) = &path.item {
            for op in &item.operations {
                if let Some(security) = &op.security {
                    pending.extend(security_pointers(security));
                }
            }
        }
    }
    // Depth-first: pop from the back, push newly found references after.
    pending.reverse();

    let mut closure = Components::default();
    let mut visited: HashSet<String> = HashSet::new();
    while let Some(pointer) = pending.pop() {
        if !visited.insert(pointer.clone()) {
            continue;
        }
        let Some(entry) = find(&document.components, &pointer, sink) else {
            continue;
        };
        closure.push(entry);
        let mut nested = entry.references();
        nested.reverse();
        pending.extend(nested);
    }

    closure.sort_by_name();
    closure
}

fn security_pointers(requirements: &[SecurityRequirement]) -> impl Iterator<Item = String> + '_ {
    requirements
        .iter()
        .flat_map(|r| r.schemes.keys())
        .map(|name| component_pointer(Section::SecuritySchemes, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserOptions;
    use crate::diagnostics::{CollectingSink, Severity};
    use crate::oas::parse_yaml;

    const ZOO: &str = r#"
openapi: 3.0.3
info:
  title: Zoo
  version: 1.0.0
tags:
  - name: animals
  - name: keepers
security:
  - api_key: []
paths:
  /animals:
    get:
      tags: [animals]
      operationId: listAnimals
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: '#/components/schemas/Animal'
    post:
      tags: [keepers]
      operationId: feedAnimals
      security:
        - keeper_auth: []
      responses:
        '204':
          description: Fed
  /keepers/{id}:
    get:
      tags: [keepers]
      operationId: getKeeper
      parameters:
        - $ref: '#/components/parameters/Id'
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Keeper'
  /shared:
    $ref: '#/components/pathItems/Shared'
components:
  parameters:
    Id:
      name: id
      in: path
      required: true
      schema:
        type: string
  schemas:
    Animal:
      type: object
      properties:
        keeper:
          $ref: '#/components/schemas/Keeper'
        enclosure:
          $ref: '#/components/schemas/Missing'
    Keeper:
      type: object
      properties:
        name:
          type: string
        favourite:
          $ref: '#/components/schemas/Animal'
    Unused:
      type: string
  securitySchemes:
    api_key:
      type: apiKey
      name: key
      in: header
    keeper_auth:
      type: http
      scheme: bearer
"#;

    fn names(components: &Components, section: Section) -> Vec<String> {
        components
            .section(section)
            .map(|c| c.name().to_string())
            .collect()
    }

    #[test]
    fn test_one_document_per_tag() {
        let sink = CollectingSink::new();
        let doc = parse_yaml(ZOO, &ParserOptions::default(), &sink).unwrap();
        let parts = organize_by_tags(&doc, &sink);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].tags[0].name, "animals");
        assert_eq!(parts[1].tags[0].name, "keepers");
    }

    #[test]
    fn test_operations_are_filtered_and_reference_paths_pass_through() {
        let sink = CollectingSink::new();
        let doc = parse_yaml(ZOO, &ParserOptions::default(), &sink).unwrap();
        let parts = organize_by_tags(&doc, &sink);

        let animal_paths: Vec<&str> = parts[0].paths.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(animal_paths, vec!["/animals", "/shared"]);
        let animals = parts[0].paths[0].item.as_item().unwrap();
        assert_eq!(animals.operations.len(), 1);
        assert_eq!(animals.operations[0].operation_id.as_deref(), Some("listAnimals"));

        let keeper_paths: Vec<&str> = parts[1].paths.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(keeper_paths, vec!["/animals", "/keepers/{id}", "/shared"]);
    }

    #[test]
    fn test_closure_is_transitive_sorted_and_cycle_safe() {
        let sink = CollectingSink::new();
        let doc = parse_yaml(ZOO, &ParserOptions::default(), &sink).unwrap();
        let parts = organize_by_tags(&doc, &sink);

        assert_eq!(names(&parts[0].components, Section::Models), vec!["Animal", "Keeper"]);
        assert_eq!(names(&parts[0].components, Section::SecuritySchemes), vec!["api_key"]);
        assert_eq!(
            names(&parts[1].components, Section::SecuritySchemes),
            vec!["api_key", "keeper_auth"]
        );
        assert_eq!(names(&parts[1].components, Section::Parameters), vec!["Id"]);
        assert!(!parts[1].components.contains("#/components/schemas/Unused"));
    }

    #[test]
    fn test_unresolved_references_are_reported_and_skipped() {
        let sink = CollectingSink::new();
        let doc = parse_yaml(ZOO, &ParserOptions::default(), &sink).unwrap();
        let parts = organize_by_tags(&doc, &sink);
        assert!(!parts[0].components.contains("#/components/schemas/Missing"));
        let unresolved: Vec<_> = sink
            .at_least(Severity::Warning)
            .into_iter()
            .filter(|d| d.message == "Unresolved reference")
            .filter_map(|d| d.pointer)
            .collect();
        assert!(unresolved.contains(&"#/components/schemas/Missing".to_string()));
        assert!(unresolved.contains(&"#/components/pathItems/Shared".to_string()));
    }
}
