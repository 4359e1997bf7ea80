//! # Hoisting
//!
//! Moves an inline fragment into the component table under a generated
//! pointer and hands back the reference that replaces it.
//!
//! Names derive from the operation. A name already taken by an equal
//! fragment is reused; a name taken by a different fragment, or by any
//! entry of the target section (user-declared ones included), gets the
//! fragment's content hash appended. No two entries of a section share a
//! pointer or a name.

use super::hasher::{fingerprint, FragmentHasher};
use crate::diagnostics::{debug, DiagnosticSink};
use crate::model::{
    Component, Components, RefOr, ReferenceNode, RequestBody, Response, SchemaNode,
};
use crate::ref_utils::generated_pointer;
use serde::Serialize;

/// A definition type that has its own section in the component table.
pub trait Hoistable: Clone + PartialEq + Serialize {
    /// The section hoisted fragments of this type land in.
    fn section(components: &mut Components) -> &mut Vec<Component<Self>>;
}

impl Hoistable for SchemaNode {
    fn section(components: &mut Components) -> &mut Vec<Component<Self>> {
        &mut components.models
    }
}

impl Hoistable for RefOr<RequestBody> {
    fn section(components: &mut Components) -> &mut Vec<Component<Self>> {
        &mut components.request_bodies
    }
}

impl Hoistable for RefOr<Response> {
    fn section(components: &mut Components) -> &mut Vec<Component<Self>> {
        &mut components.responses
    }
}

/// Owns the output component table while fragments are hoisted into it.
pub struct Hoister<'h> {
    components: Components,
    hasher: &'h dyn FragmentHasher,
    hash_length: usize,
    sink: &'h dyn DiagnosticSink,
}

impl<'h> Hoister<'h> {
    /// Starts from an existing table.
    pub fn new(
        components: Components,
        hasher: &'h dyn FragmentHasher,
        hash_length: usize,
        sink: &'h dyn DiagnosticSink,
    ) -> Self {
        Self {
            components,
            hasher,
            hash_length,
            sink,
        }
    }

    /// Inserts `definition` under `#/components/generated/<kind>/<name>`
    /// (or a hash-suffixed variant of `name`) and returns its reference.
    pub fn hoist<T: Hoistable>(&mut self, kind: &str, name: &str, definition: T) -> ReferenceNode {
        let mut candidate = name.to_string();
        let mut attempt = 0usize;
        loop {
            let pointer = generated_pointer(kind, &candidate);
            let section = T::section(&mut self.components);
            let existing = section.iter().position(|c| c.reference_name == pointer);
            let name_taken = section.iter().any(|c| c.name == candidate);
            match existing {
                Some(index) if section[index].definition == definition => {
                    debug(self.sink, &pointer, "Reusing equal hoisted fragment");
                    return ReferenceNode::new(pointer);
                }
                None if !name_taken => {
                    tracing::trace!(pointer = %pointer, "hoisted fragment");
                    section.push(Component::new(candidate, pointer.clone(), definition));
                    return ReferenceNode::new(pointer);
                }
                _ => {
                    attempt += 1;
                    let hash = fingerprint(self.hasher, &definition, self.hash_length);
                    candidate = match attempt {
                        1 => format!("{}{}", name, hash),
                        n => format!("{}{}{}", name, hash, n),
                    };
                }
            }
        }
    }

    /// Read access to the table built so far.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Gives the table back.
    pub fn into_components(self) -> Components {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::model::{ComponentRef, PrimitiveType};
    use crate::optimizer::hasher::Sha256Hasher;
    use crate::resolver::find;

    #[test]
    fn test_equal_fragments_share_a_pointer() {
        let sink = CollectingSink::new();
        let mut hoister = Hoister::new(Components::default(), &Sha256Hasher, 8, &sink);
        let node = SchemaNode::primitive(PrimitiveType::String);
        let a = hoister.hoist("schemas", "GetPetRequest", node.clone());
        let b = hoister.hoist("schemas", "GetPetRequest", node);
        assert_eq!(a, b);
        assert_eq!(hoister.components().models.len(), 1);
    }

    #[test]
    fn test_distinct_fragments_get_hash_suffix() {
        let sink = CollectingSink::new();
        let mut hoister = Hoister::new(Components::default(), &Sha256Hasher, 8, &sink);
        let a = hoister.hoist("schemas", "Body", SchemaNode::primitive(PrimitiveType::String));
        let b = hoister.hoist("schemas", "Body", SchemaNode::primitive(PrimitiveType::Integer));
        assert_eq!(a.pointer, "#/components/generated/schemas/Body");
        assert_ne!(a.pointer, b.pointer);
        assert!(b.pointer.starts_with("#/components/generated/schemas/Body"));
        assert_eq!(b.pointer.len(), a.pointer.len() + 8);
    }

    #[test]
    fn test_user_model_name_is_not_shadowed() {
        let sink = CollectingSink::new();
        let mut table = Components::default();
        table.models.push(Component::new(
            "GetXQueryParameters",
            "#/components/schemas/GetXQueryParameters",
            SchemaNode::primitive(PrimitiveType::String),
        ));
        let mut hoister = Hoister::new(table, &Sha256Hasher, 8, &sink);
        let group = SchemaNode::primitive(PrimitiveType::Integer);
        let reference = hoister.hoist("query", "GetXQueryParameters", group.clone());
        assert_ne!(
            reference.pointer,
            "#/components/generated/query/GetXQueryParameters"
        );

        let names: Vec<&str> = hoister
            .components()
            .models
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names.len(), 2);
        assert_ne!(names[0], names[1]);
        assert_eq!(names[1].len(), "GetXQueryParameters".len() + 8);

        let again = hoister.hoist("query", "GetXQueryParameters", group);
        assert_eq!(again, reference);
        assert_eq!(hoister.components().models.len(), 2);
    }

    #[test]
    fn test_hoisted_fragment_resolves_back() {
        let sink = CollectingSink::new();
        let mut hoister = Hoister::new(Components::default(), &Sha256Hasher, 8, &sink);
        let node = SchemaNode::primitive(PrimitiveType::Boolean);
        let reference = hoister.hoist("query", "ListPetsQueryParameters", node.clone());
        let table = hoister.into_components();
        match find(&table, &reference.pointer, &sink) {
            Some(ComponentRef::Model(c)) => assert_eq!(c.definition, node),
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }
}
