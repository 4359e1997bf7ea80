//! # Schema Nodes
//!
//! The type-level node category: every shape a JSON Schema fragment can take
//! after parsing.

use super::modifiers::Modifiers;
use indexmap::IndexMap;
use serde::Serialize;

/// Scalar type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// A schema without shape keywords (`{}` / `true`).
    Any,
    /// Placeholder for a definition the document failed to provide.
    Void,
}

impl PrimitiveType {
    /// Parses a JSON Schema `type` keyword value.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveType::String),
            "number" => Some(PrimitiveType::Number),
            "integer" => Some(PrimitiveType::Integer),
            "boolean" => Some(PrimitiveType::Boolean),
            "null" => Some(PrimitiveType::Null),
            _ => None,
        }
    }
}

/// A pointer to a component, with optional documentation overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceNode {
    /// The `$ref` string, e.g. `#/components/schemas/Pet`.
    pub pointer: String,
    /// `summary` sibling of `$ref` (3.1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `description` sibling of `$ref` (3.1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReferenceNode {
    /// Creates a plain reference.
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            summary: None,
            description: None,
        }
    }
}

/// A scalar schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveNode {
    /// The scalar type.
    pub primitive: PrimitiveType,
    /// Constraints and metadata.
    pub modifiers: Modifiers,
}

/// A named member of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Membership in the parent's `required` list.
    pub required: bool,
    /// Description pulled up from the definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The property schema.
    pub definition: SchemaNode,
}

/// `additionalProperties` in either of its two forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` / `false`
    Flag(bool),
    /// A schema every extra property must satisfy.
    Schema(Box<SchemaNode>),
}

impl AdditionalProperties {
    /// True for every form that accepts arbitrary extra properties.
    fn is_unconstrained(this: Option<&Self>) -> bool {
        match this {
            None | Some(AdditionalProperties::Flag(true)) => true,
            Some(AdditionalProperties::Flag(false)) => false,
            Some(AdditionalProperties::Schema(schema)) => is_plain_any(schema),
        }
    }
}

/// An object schema with ordered properties.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNode {
    /// Properties in declaration order.
    pub properties: Vec<Property>,
    /// `additionalProperties`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Constraints and metadata.
    pub modifiers: Modifiers,
}

impl ObjectNode {
    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        let additional_eq = match (&self.additional_properties, &other.additional_properties) {
            (Some(AdditionalProperties::Schema(a)), Some(AdditionalProperties::Schema(b))) => a == b,
            (a, b) => {
                AdditionalProperties::is_unconstrained(a.as_ref())
                    == AdditionalProperties::is_unconstrained(b.as_ref())
                    && !matches!(a, Some(AdditionalProperties::Schema(s)) if !is_plain_any(s))
                    && !matches!(b, Some(AdditionalProperties::Schema(s)) if !is_plain_any(s))
            }
        };
        additional_eq && self.properties == other.properties && self.modifiers == other.modifiers
    }
}

fn is_plain_any(node: &SchemaNode) -> bool {
    matches!(node, SchemaNode::Primitive(p) if p.primitive == PrimitiveType::Any && p.modifiers.is_empty())
}

/// An array schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayNode {
    /// Element schema.
    pub items: Box<SchemaNode>,
    /// Constraints and metadata.
    pub modifiers: Modifiers,
}

/// `allOf`: every definition applies and is structurally merged downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeNode {
    /// Merged definitions.
    pub definitions: Vec<SchemaNode>,
    /// Constraints and metadata.
    pub modifiers: Modifiers,
}

/// Which keyword produced a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnionKind {
    /// `anyOf`, or a `type` array.
    Any,
    /// `oneOf` (exactly one alternative matches).
    Xor,
}

/// Discriminator lifted onto a union.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionDiscriminator {
    /// Name of the selecting property.
    pub property_name: String,
    /// Discriminator value -> alternative (always a reference node).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, SchemaNode>,
}

/// `anyOf` / `oneOf` / mixed `type` arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionNode {
    /// Keyword that produced this node.
    pub kind: UnionKind,
    /// Alternatives in declaration order.
    pub definitions: Vec<SchemaNode>,
    /// Discriminator, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<UnionDiscriminator>,
    /// Constraints and metadata.
    pub modifiers: Modifiers,
}

impl UnionNode {
    /// The discriminator property name, if any.
    pub fn discriminator_property_name(&self) -> Option<&str> {
        self.discriminator
            .as_ref()
            .map(|d| d.property_name.as_str())
    }

    /// The discriminator mapping, if any.
    pub fn discriminator_mapping(&self) -> Option<&IndexMap<String, SchemaNode>> {
        self.discriminator.as_ref().map(|d| &d.mapping)
    }
}

/// `not`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionNode {
    /// The excluded schema.
    pub definition: Box<SchemaNode>,
    /// Constraints and metadata.
    pub modifiers: Modifiers,
}

/// A parsed schema fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SchemaNode {
    /// Scalar.
    Primitive(PrimitiveNode),
    /// Object with properties.
    Object(ObjectNode),
    /// Array.
    Array(ArrayNode),
    /// `allOf`
    Composite(CompositeNode),
    /// `anyOf` / `oneOf`
    Union(UnionNode),
    /// `not`
    Exclusion(ExclusionNode),
    /// `$ref`
    Reference(ReferenceNode),
}

impl SchemaNode {
    /// Builds a primitive node with empty modifiers.
    pub fn primitive(primitive: PrimitiveType) -> Self {
        SchemaNode::Primitive(PrimitiveNode {
            primitive,
            modifiers: Modifiers::default(),
        })
    }

    /// Builds a reference node.
    pub fn reference(pointer: impl Into<String>) -> Self {
        SchemaNode::Reference(ReferenceNode::new(pointer))
    }

    /// The modifier bag; `None` for references.
    pub fn modifiers(&self) -> Option<&Modifiers> {
        match self {
            SchemaNode::Primitive(n) => Some(&n.modifiers),
            SchemaNode::Object(n) => Some(&n.modifiers),
            SchemaNode::Array(n) => Some(&n.modifiers),
            SchemaNode::Composite(n) => Some(&n.modifiers),
            SchemaNode::Union(n) => Some(&n.modifiers),
            SchemaNode::Exclusion(n) => Some(&n.modifiers),
            SchemaNode::Reference(_) => None,
        }
    }

    /// Mutable modifier bag; `None` for references.
    pub fn modifiers_mut(&mut self) -> Option<&mut Modifiers> {
        match self {
            SchemaNode::Primitive(n) => Some(&mut n.modifiers),
            SchemaNode::Object(n) => Some(&mut n.modifiers),
            SchemaNode::Array(n) => Some(&mut n.modifiers),
            SchemaNode::Composite(n) => Some(&mut n.modifiers),
            SchemaNode::Union(n) => Some(&mut n.modifiers),
            SchemaNode::Exclusion(n) => Some(&mut n.modifiers),
            SchemaNode::Reference(_) => None,
        }
    }

    /// Variant name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::Primitive(_) => "primitive",
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Composite(_) => "composite",
            SchemaNode::Union(_) => "union",
            SchemaNode::Exclusion(_) => "exclusion",
            SchemaNode::Reference(_) => "reference",
        }
    }

    /// True for shapes worth naming when found inline in a body.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SchemaNode::Object(_)
                | SchemaNode::Composite(_)
                | SchemaNode::Union(_)
                | SchemaNode::Exclusion(_)
        )
    }

    /// The reference pointer, when this is a reference.
    pub fn as_reference(&self) -> Option<&ReferenceNode> {
        match self {
            SchemaNode::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// The object payload, when this is an object.
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            SchemaNode::Object(o) => Some(o),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(additional: Option<AdditionalProperties>) -> ObjectNode {
        ObjectNode {
            properties: vec![Property {
                name: "id".into(),
                required: true,
                description: None,
                definition: SchemaNode::primitive(PrimitiveType::Integer),
            }],
            additional_properties: additional,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_additional_properties_default_forms_are_equal() {
        let absent = object(None);
        let flag = object(Some(AdditionalProperties::Flag(true)));
        let any = object(Some(AdditionalProperties::Schema(Box::new(
            SchemaNode::primitive(PrimitiveType::Any),
        ))));
        assert_eq!(absent, flag);
        assert_eq!(absent, any);
        assert_ne!(absent, object(Some(AdditionalProperties::Flag(false))));
    }

    #[test]
    fn test_additional_properties_schema_compares_structurally() {
        let strings = object(Some(AdditionalProperties::Schema(Box::new(
            SchemaNode::primitive(PrimitiveType::String),
        ))));
        assert_ne!(strings, object(None));
        assert_eq!(strings, strings.clone());
    }

    #[test]
    fn test_serialized_discriminant() {
        let node = SchemaNode::reference("#/components/schemas/Pet");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "reference");
        assert_eq!(value["pointer"], "#/components/schemas/Pet");
    }
}
