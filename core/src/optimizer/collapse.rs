//! # Collapsing and Object Merging
//!
//! A union or composite wrapping exactly one alternative is that alternative.
//! The wrapper's own modifiers win over the alternative's when both set a
//! field. Two cases keep the wrapper:
//!
//! - a union carrying a discriminator,
//! - a lone reference alternative under a wrapper whose modifiers say more
//!   than a description, since a reference node has no modifier bag.

use crate::model::{
    AdditionalProperties, CompositeNode, Modifiers, ObjectNode, Property, SchemaNode, UnionNode,
};

/// Collapses every single-alternative wrapper in the tree, bottom-up.
pub fn collapse(node: SchemaNode) -> SchemaNode {
    match node {
        SchemaNode::Object(mut object) => {
            object.properties = object
                .properties
                .into_iter()
                .map(|p| Property {
                    definition: collapse(p.definition),
                    ..p
                })
                .collect();
            if let Some(AdditionalProperties::Schema(schema)) = object.additional_properties {
                object.additional_properties =
                    Some(AdditionalProperties::Schema(Box::new(collapse(*schema))));
            }
            SchemaNode::Object(object)
        }
        SchemaNode::Array(mut array) => {
            array.items = Box::new(collapse(*array.items));
            SchemaNode::Array(array)
        }
        SchemaNode::Exclusion(mut exclusion) => {
            exclusion.definition = Box::new(collapse(*exclusion.definition));
            SchemaNode::Exclusion(exclusion)
        }
        SchemaNode::Composite(composite) => {
            let definitions: Vec<SchemaNode> =
                composite.definitions.into_iter().map(collapse).collect();
            unwrap_single(definitions, composite.modifiers, |definitions, modifiers| {
                SchemaNode::Composite(CompositeNode {
                    definitions,
                    modifiers,
                })
            })
        }
        SchemaNode::Union(union) => {
            let definitions: Vec<SchemaNode> = union.definitions.into_iter().map(collapse).collect();
            if union.discriminator.is_some() {
                return SchemaNode::Union(UnionNode {
                    definitions,
                    ..union
                });
            }
            let kind = union.kind;
            unwrap_single(definitions, union.modifiers, |definitions, modifiers| {
                SchemaNode::Union(UnionNode {
                    kind,
                    definitions,
                    discriminator: None,
                    modifiers,
                })
            })
        }
        leaf @ (SchemaNode::Primitive(_) | SchemaNode::Reference(_)) => leaf,
    }
}

/// Collapses `node` in place.
pub fn collapse_in_place(node: &mut SchemaNode) {
    let taken = std::mem::replace(node, SchemaNode::primitive(crate::model::PrimitiveType::Any));
    *node = collapse(taken);
}

fn unwrap_single(
    mut definitions: Vec<SchemaNode>,
    modifiers: Modifiers,
    rebuild: impl FnOnce(Vec<SchemaNode>, Modifiers) -> SchemaNode,
) -> SchemaNode {
    if definitions.len() != 1 {
        return rebuild(definitions, modifiers);
    }
    match definitions.remove(0) {
        SchemaNode::Reference(mut reference) => {
            let beyond_description = Modifiers {
                description: None,
                ..modifiers.clone()
            };
            if !beyond_description.is_empty() {
                return rebuild(vec![SchemaNode::Reference(reference)], modifiers);
            }
            if modifiers.description.is_some() {
                reference.description = modifiers.description;
            }
            SchemaNode::Reference(reference)
        }
        mut inner => {
            if let Some(target) = inner.modifiers_mut() {
                overlay(target, modifiers);
            }
            inner
        }
    }
}

/// Merges every object member of a composite into the first one.
///
/// Properties are concatenated in member order; a later property replaces an
/// earlier one of the same name in place. Non-object members are kept as
/// separate members after the merged object's position.
pub fn merge_objects(definitions: Vec<SchemaNode>) -> Vec<SchemaNode> {
    let mut merged: Option<(usize, ObjectNode)> = None;
    let mut rest: Vec<SchemaNode> = Vec::new();

    for definition in definitions {
        match definition {
            SchemaNode::Object(object) => match &mut merged {
                None => merged = Some((rest.len(), object)),
                Some((_, target)) => {
                    for property in object.properties {
                        match target.properties.iter_mut().find(|p| p.name == property.name) {
                            Some(slot) => *slot = property,
                            None => target.properties.push(property),
                        }
                    }
                    if target.additional_properties.is_none() {
                        target.additional_properties = object.additional_properties;
                    }
                    fill(&mut target.modifiers, object.modifiers);
                }
            },
            other => rest.push(other),
        }
    }

    if let Some((position, object)) = merged {
        rest.insert(position, SchemaNode::Object(object));
    }
    rest
}

/// Copies every field set in `top` onto `base`.
fn overlay(base: &mut Modifiers, top: Modifiers) {
    let mut result = top;
    fill(&mut result, std::mem::take(base));
    *base = result;
}

macro_rules! fill_fields {
    ($base:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $base.$field.is_none() {
                $base.$field = $other.$field;
            }
        )+
    };
}

/// Copies every field set in `other` but unset in `base`.
fn fill(base: &mut Modifiers, other: Modifiers) {
    fill_fields!(
        base,
        other,
        title,
        description,
        format,
        default,
        example,
        minimum,
        maximum,
        exclusive_minimum,
        exclusive_maximum,
        multiple_of,
        min_length,
        max_length,
        pattern,
        min_items,
        max_items,
        unique_items,
        min_properties,
        max_properties,
        enum_values,
        nullable,
        read_only,
        write_only,
        deprecated,
        discriminator,
    );
    for (key, value) in other.extensions {
        base.extensions.entry(key).or_insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PrimitiveNode, PrimitiveType, UnionDiscriminator, UnionKind};
    use indexmap::IndexMap;

    fn described(text: &str) -> Modifiers {
        Modifiers {
            description: Some(text.into()),
            ..Default::default()
        }
    }

    fn string_with(modifiers: Modifiers) -> SchemaNode {
        SchemaNode::Primitive(PrimitiveNode {
            primitive: PrimitiveType::String,
            modifiers,
        })
    }

    fn single_prop(name: &str) -> SchemaNode {
        SchemaNode::Object(ObjectNode {
            properties: vec![Property {
                name: name.into(),
                required: false,
                description: None,
                definition: SchemaNode::primitive(PrimitiveType::String),
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_single_alternative_collapses_and_wrapper_modifiers_win() {
        let wrapped = SchemaNode::Composite(CompositeNode {
            definitions: vec![string_with(Modifiers {
                description: Some("inner".into()),
                format: Some("uuid".into()),
                ..Default::default()
            })],
            modifiers: described("outer"),
        });
        let SchemaNode::Primitive(p) = collapse(wrapped) else {
            panic!("expected primitive");
        };
        assert_eq!(p.modifiers.description.as_deref(), Some("outer"));
        assert_eq!(p.modifiers.format.as_deref(), Some("uuid"));
    }

    #[test]
    fn test_collapse_is_idempotent_and_matches_bare_alternative() {
        let inner = SchemaNode::Union(UnionNode {
            kind: UnionKind::Any,
            definitions: vec![single_prop("a")],
            discriminator: None,
            modifiers: Modifiers::default(),
        });
        let wrapped = SchemaNode::Composite(CompositeNode {
            definitions: vec![inner.clone()],
            modifiers: Modifiers::default(),
        });
        let once = collapse(wrapped);
        assert_eq!(once, collapse(inner));
        assert_eq!(collapse(once.clone()), once);
    }

    #[test]
    fn test_reference_takes_wrapper_description_only() {
        let wrapped = SchemaNode::Composite(CompositeNode {
            definitions: vec![SchemaNode::reference("#/components/schemas/Pet")],
            modifiers: described("The pet"),
        });
        let SchemaNode::Reference(r) = collapse(wrapped) else {
            panic!("expected reference");
        };
        assert_eq!(r.description.as_deref(), Some("The pet"));

        let constrained = SchemaNode::Composite(CompositeNode {
            definitions: vec![SchemaNode::reference("#/components/schemas/Pet")],
            modifiers: Modifiers {
                nullable: Some(true),
                ..Default::default()
            },
        });
        assert_eq!(collapse(constrained.clone()), constrained);
    }

    #[test]
    fn test_discriminated_union_is_never_collapsed() {
        let mut mapping = IndexMap::new();
        mapping.insert("cat".to_string(), SchemaNode::reference("#/components/schemas/Cat"));
        let union = SchemaNode::Union(UnionNode {
            kind: UnionKind::Xor,
            definitions: vec![SchemaNode::reference("#/components/schemas/Cat")],
            discriminator: Some(UnionDiscriminator {
                property_name: "type".into(),
                mapping,
            }),
            modifiers: Modifiers::default(),
        });
        assert_eq!(collapse(union.clone()), union);
    }

    #[test]
    fn test_nested_wrappers_collapse_inside_properties() {
        let object = SchemaNode::Object(ObjectNode {
            properties: vec![Property {
                name: "id".into(),
                required: true,
                description: None,
                definition: SchemaNode::Composite(CompositeNode {
                    definitions: vec![SchemaNode::primitive(PrimitiveType::Integer)],
                    modifiers: Modifiers::default(),
                }),
            }],
            ..Default::default()
        });
        let collapsed = collapse(object);
        assert_eq!(
            collapsed.as_object().unwrap().properties[0].definition,
            SchemaNode::primitive(PrimitiveType::Integer)
        );
    }

    #[test]
    fn test_merge_objects_concatenates_and_keeps_others() {
        let merged = merge_objects(vec![
            SchemaNode::reference("#/components/schemas/Base"),
            single_prop("a"),
            single_prop("b"),
            single_prop("a"),
        ]);
        assert_eq!(merged.len(), 2);
        assert!(merged[0].as_reference().is_some());
        let names: Vec<&str> = merged[1]
            .as_object()
            .unwrap()
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
