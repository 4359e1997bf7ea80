#![deny(missing_docs)]

//! # Read/Write Omission
//!
//! Computes the view of a schema as seen from one side of the wire: request
//! content drops `readOnly` properties, response content drops `writeOnly`
//! properties.
//!
//! The walk handles references (resolved once, then walked), objects
//! (properties filtered) and composites (each member walked). Arrays, unions
//! and exclusions are left untouched and reported at debug level.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::model::{CompositeNode, Components, ObjectNode, SchemaNode, Visibility};
use crate::resolver::find_model;
use std::collections::HashSet;

/// Returns the omitted view of `node`, or `None` when nothing was removed.
pub fn omit(
    node: &SchemaNode,
    visibility: Visibility,
    components: &Components,
    sink: &dyn DiagnosticSink,
) -> Option<SchemaNode> {
    if visibility == Visibility::Full {
        return None;
    }
    let mut visited = HashSet::new();
    omit_node(node, visibility, components, sink, &mut visited)
}

fn omit_node(
    node: &SchemaNode,
    visibility: Visibility,
    components: &Components,
    sink: &dyn DiagnosticSink,
    visited: &mut HashSet<String>,
) -> Option<SchemaNode> {
    match node {
        SchemaNode::Reference(r) => {
            if !visited.insert(r.pointer.clone()) {
                return None;
            }
            let view = find_model(components, &r.pointer, sink).and_then(|component| {
                omit_node(&component.definition, visibility, components, sink, visited)
            });
            visited.remove(&r.pointer);
            let mut view = view?;
            if let (Some(text), Some(modifiers)) = (r.description.clone(), view.modifiers_mut()) {
                modifiers.description = Some(text);
            }
            Some(view)
        }
        SchemaNode::Object(object) => omit_object(object, visibility),
        SchemaNode::Composite(composite) => {
            let mut changed = false;
            let definitions = composite
                .definitions
                .iter()
                .map(|member| {
                    match omit_node(member, visibility, components, sink, visited) {
                        Some(view) => {
                            changed = true;
                            view
                        }
                        None => member.clone(),
                    }
                })
                .collect();
            changed.then(|| {
                SchemaNode::Composite(CompositeNode {
                    definitions,
                    modifiers: composite.modifiers.clone(),
                })
            })
        }
        SchemaNode::Array(_) | SchemaNode::Union(_) | SchemaNode::Exclusion(_) => {
            sink.report(Diagnostic::new(
                Severity::Debug,
                format!(
                    "Read/write omission is not applied to {} schemas",
                    node.kind_name()
                ),
            ));
            None
        }
        SchemaNode::Primitive(_) => None,
    }
}

fn omit_object(object: &ObjectNode, visibility: Visibility) -> Option<SchemaNode> {
    let hidden = |definition: &SchemaNode| {
        let Some(modifiers) = definition.modifiers() else {
            return false;
        };
        match visibility {
            Visibility::Write => modifiers.is_read_only(),
            Visibility::Read => modifiers.is_write_only(),
            Visibility::Full => false,
        }
    };

    if !object.properties.iter().any(|p| hidden(&p.definition)) {
        return None;
    }

    Some(SchemaNode::Object(ObjectNode {
        properties: object
            .properties
            .iter()
            .filter(|p| !hidden(&p.definition))
            .cloned()
            .collect(),
        additional_properties: object.additional_properties.clone(),
        modifiers: object.modifiers.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::model::{
        ArrayNode, Component, Modifiers, PrimitiveNode, PrimitiveType, Property, Section,
    };
    use crate::ref_utils::component_pointer;

    fn flagged(name: &str, read_only: bool, write_only: bool) -> Property {
        Property {
            name: name.into(),
            required: false,
            description: None,
            definition: SchemaNode::Primitive(PrimitiveNode {
                primitive: PrimitiveType::String,
                modifiers: Modifiers {
                    read_only: read_only.then_some(true),
                    write_only: write_only.then_some(true),
                    ..Default::default()
                },
            }),
        }
    }

    fn user() -> SchemaNode {
        SchemaNode::Object(ObjectNode {
            properties: vec![
                flagged("id", true, false),
                flagged("password", false, true),
                flagged("name", false, false),
            ],
            ..Default::default()
        })
    }

    fn names(node: &SchemaNode) -> Vec<String> {
        node.as_object()
            .unwrap()
            .properties
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn test_write_view_drops_read_only() {
        let sink = CollectingSink::new();
        let view = omit(&user(), Visibility::Write, &Components::default(), &sink).unwrap();
        assert_eq!(names(&view), vec!["password", "name"]);
    }

    #[test]
    fn test_read_view_drops_write_only() {
        let sink = CollectingSink::new();
        let view = omit(&user(), Visibility::Read, &Components::default(), &sink).unwrap();
        assert_eq!(names(&view), vec!["id", "name"]);
    }

    #[test]
    fn test_full_view_is_untouched() {
        let sink = CollectingSink::new();
        assert!(omit(&user(), Visibility::Full, &Components::default(), &sink).is_none());
    }

    #[test]
    fn test_reference_is_resolved_once() {
        let mut table = Components::default();
        table.models.push(Component::new(
            "User",
            component_pointer(Section::Models, "User"),
            user(),
        ));
        let sink = CollectingSink::new();
        let reference = SchemaNode::reference("#/components/schemas/User");
        let view = omit(&reference, Visibility::Write, &table, &sink).unwrap();
        assert_eq!(names(&view), vec!["password", "name"]);
    }

    #[test]
    fn test_composite_members_are_walked() {
        let sink = CollectingSink::new();
        let composite = SchemaNode::Composite(CompositeNode {
            definitions: vec![user(), SchemaNode::primitive(PrimitiveType::String)],
            modifiers: Modifiers::default(),
        });
        let view = omit(&composite, Visibility::Read, &Components::default(), &sink).unwrap();
        let SchemaNode::Composite(c) = view else {
            panic!("expected composite");
        };
        assert_eq!(names(&c.definitions[0]), vec!["id", "name"]);
        assert_eq!(c.definitions[1], SchemaNode::primitive(PrimitiveType::String));
    }

    #[test]
    fn test_array_is_passed_through_with_debug_report() {
        let sink = CollectingSink::new();
        let array = SchemaNode::Array(ArrayNode {
            items: Box::new(user()),
            modifiers: Modifiers::default(),
        });
        assert!(omit(&array, Visibility::Write, &Components::default(), &sink).is_none());
        assert!(sink.contains("not applied to array"));
    }

    #[test]
    fn test_unresolved_reference_is_reported() {
        let sink = CollectingSink::new();
        let reference = SchemaNode::reference("#/components/schemas/Missing");
        assert!(omit(&reference, Visibility::Write, &Components::default(), &sink).is_none());
        assert!(sink.contains("Unresolved reference"));
    }

    #[test]
    fn test_cyclic_reference_terminates() {
        let mut table = Components::default();
        table.models.push(Component::new(
            "Node",
            component_pointer(Section::Models, "Node"),
            SchemaNode::Composite(CompositeNode {
                definitions: vec![SchemaNode::reference("#/components/schemas/Node")],
                modifiers: Modifiers::default(),
            }),
        ));
        let sink = CollectingSink::new();
        let reference = SchemaNode::reference("#/components/schemas/Node");
        assert!(omit(&reference, Visibility::Write, &table, &sink).is_none());
    }
}
