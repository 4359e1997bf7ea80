//! # Traversal
//!
//! [`CollectReferences`] is a depth-first walk that gathers every reference
//! pointer reachable from a node without crossing into the component table.
//! Traversal order is deterministic: declaration order for properties and
//! alternatives, map insertion order everywhere else.
//!
//! [`VisitSchemasMut`] hands every top-level schema tree held by a
//! declaration to a callback for in-place rewriting.

use super::components::{ComponentRef, Components};
use super::declarations::{
    Callback, Encoding, Header, Link, MediaType, Parameter, RefOr, RequestBody, Response,
    SecurityScheme,
};
use super::operations::{Operation, Path, PathItem};
use super::schema::{AdditionalProperties, SchemaNode};

/// Nodes that can contain references.
pub trait CollectReferences {
    /// Appends every reference pointer found under `self` to `out`.
    fn collect_references(&self, out: &mut Vec<String>);

    /// Convenience wrapper returning a fresh list.
    fn references(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }
}

impl<T: CollectReferences> CollectReferences for RefOr<T> {
    fn collect_references(&self, out: &mut Vec<String>) {
        match self {
            RefOr::Reference(r) => out.push(r.pointer.clone()),
            RefOr::Item(item) => item.collect_references(out),
        }
    }
}

impl<T: CollectReferences> CollectReferences for Option<T> {
    fn collect_references(&self, out: &mut Vec<String>) {
        if let Some(inner) = self {
            inner.collect_references(out);
        }
    }
}

impl CollectReferences for SchemaNode {
    fn collect_references(&self, out: &mut Vec<String>) {
        match self {
            SchemaNode::Primitive(_) => {}
            SchemaNode::Reference(r) => out.push(r.pointer.clone()),
            SchemaNode::Object(o) => {
                for property in &o.properties {
                    property.definition.collect_references(out);
                }
                if let Some(AdditionalProperties::Schema(schema)) = &o.additional_properties {
                    schema.collect_references(out);
                }
            }
            SchemaNode::Array(a) => a.items.collect_references(out),
            SchemaNode::Composite(c) => {
                for definition in &c.definitions {
                    definition.collect_references(out);
                }
            }
            SchemaNode::Union(u) => {
                for definition in &u.definitions {
                    definition.collect_references(out);
                }
                if let Some(discriminator) = &u.discriminator {
                    for target in discriminator.mapping.values() {
                        target.collect_references(out);
                    }
                }
            }
            SchemaNode::Exclusion(e) => e.definition.collect_references(out),
        }
    }
}

impl CollectReferences for Encoding {
    fn collect_references(&self, out: &mut Vec<String>) {
        for header in self.headers.values() {
            header.collect_references(out);
        }
    }
}

impl CollectReferences for MediaType {
    fn collect_references(&self, out: &mut Vec<String>) {
        self.definition.collect_references(out);
        for encoding in self.encodings.values() {
            encoding.collect_references(out);
        }
    }
}

impl CollectReferences for RequestBody {
    fn collect_references(&self, out: &mut Vec<String>) {
        for media in self.content.values() {
            media.collect_references(out);
        }
    }
}

impl CollectReferences for Link {
    fn collect_references(&self, _out: &mut Vec<String>) {}
}

impl CollectReferences for SecurityScheme {
    fn collect_references(&self, _out: &mut Vec<String>) {}
}

impl CollectReferences for Response {
    fn collect_references(&self, out: &mut Vec<String>) {
        for header in self.headers.values() {
            header.collect_references(out);
        }
        for media in self.content.values() {
            media.collect_references(out);
        }
        for link in self.links.values() {
            link.collect_references(out);
        }
    }
}

impl CollectReferences for Parameter {
    fn collect_references(&self, out: &mut Vec<String>) {
        self.definition.collect_references(out);
        for media in self.content.values() {
            media.collect_references(out);
        }
    }
}

impl CollectReferences for Header {
    fn collect_references(&self, out: &mut Vec<String>) {
        self.definition.collect_references(out);
        for media in self.content.values() {
            media.collect_references(out);
        }
    }
}

impl CollectReferences for Callback {
    fn collect_references(&self, out: &mut Vec<String>) {
        for item in self.expressions.values() {
            item.collect_references(out);
        }
    }
}

impl CollectReferences for Operation {
    fn collect_references(&self, out: &mut Vec<String>) {
        for parameter in &self.parameters {
            parameter.collect_references(out);
        }
        self.request_body.collect_references(out);
        for response in self.responses.values() {
            response.collect_references(out);
        }
        for callback in self.callbacks.values() {
            callback.collect_references(out);
        }
    }
}

impl CollectReferences for PathItem {
    fn collect_references(&self, out: &mut Vec<String>) {
        for parameter in &self.parameters {
            parameter.collect_references(out);
        }
        for operation in &self.operations {
            operation.collect_references(out);
        }
    }
}

impl CollectReferences for Path {
    fn collect_references(&self, out: &mut Vec<String>) {
        self.item.collect_references(out);
    }
}

impl CollectReferences for ComponentRef<'_> {
    fn collect_references(&self, out: &mut Vec<String>) {
        match self {
            ComponentRef::Model(c) => c.definition.collect_references(out),
            ComponentRef::RequestBody(c) => c.definition.collect_references(out),
            ComponentRef::Response(c) => c.definition.collect_references(out),
            ComponentRef::Parameter(c) => c.definition.collect_references(out),
            ComponentRef::Header(c) => c.definition.collect_references(out),
            ComponentRef::SecurityScheme(c) => c.definition.collect_references(out),
            ComponentRef::Link(c) => c.definition.collect_references(out),
            ComponentRef::Callback(c) => c.definition.collect_references(out),
            ComponentRef::PathItem(c) => c.definition.collect_references(out),
        }
    }
}

/// Declarations that hold schema trees.
pub trait VisitSchemasMut {
    /// Calls `f` once per schema tree root under `self`.
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode));
}

impl VisitSchemasMut for SchemaNode {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        f(self)
    }
}

impl<T: VisitSchemasMut> VisitSchemasMut for RefOr<T> {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        if let RefOr::Item(item) = self {
            item.visit_schemas_mut(f);
        }
    }
}

impl<T: VisitSchemasMut> VisitSchemasMut for Option<T> {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        if let Some(inner) = self {
            inner.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for MediaType {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        self.definition.visit_schemas_mut(f);
        for encoding in self.encodings.values_mut() {
            for header in encoding.headers.values_mut() {
                header.visit_schemas_mut(f);
            }
        }
    }
}

impl VisitSchemasMut for RequestBody {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        for media in self.content.values_mut() {
            media.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for Response {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        for header in self.headers.values_mut() {
            header.visit_schemas_mut(f);
        }
        for media in self.content.values_mut() {
            media.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for Parameter {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        self.definition.visit_schemas_mut(f);
        for media in self.content.values_mut() {
            media.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for Header {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        self.definition.visit_schemas_mut(f);
        for media in self.content.values_mut() {
            media.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for Callback {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        for item in self.expressions.values_mut() {
            item.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for Operation {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        for parameter in &mut self.parameters {
            parameter.visit_schemas_mut(f);
        }
        self.request_body.visit_schemas_mut(f);
        for response in self.responses.values_mut() {
            response.visit_schemas_mut(f);
        }
        for callback in self.callbacks.values_mut() {
            callback.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for PathItem {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        for parameter in &mut self.parameters {
            parameter.visit_schemas_mut(f);
        }
        for operation in &mut self.operations {
            operation.visit_schemas_mut(f);
        }
    }
}

impl VisitSchemasMut for Components {
    fn visit_schemas_mut(&mut self, f: &mut dyn FnMut(&mut SchemaNode)) {
        for c in &mut self.models {
            f(&mut c.definition);
        }
        for c in &mut self.request_bodies {
            c.definition.visit_schemas_mut(f);
        }
        for c in &mut self.responses {
            c.definition.visit_schemas_mut(f);
        }
        for c in &mut self.parameters {
            c.definition.visit_schemas_mut(f);
        }
        for c in &mut self.headers {
            c.definition.visit_schemas_mut(f);
        }
        for c in &mut self.callbacks {
            c.definition.visit_schemas_mut(f);
        }
        for c in &mut self.path_items {
            c.definition.visit_schemas_mut(f);
        }
    }
}
