//! # Schema Parsing
//!
//! Turns one Schema Object into a [`SchemaNode`]. References are kept as
//! pointers and never resolved here. Shape dispatch runs in a fixed order:
//! array, `type` list, `allOf`, `anyOf`, `oneOf`, `not`, object, scalar.

use super::fields::{self, child};
use super::normalization::{infer_enum_type, type_keyword, TypeKeyword};
use super::Parser;
use crate::error::{AppError, AppResult};
use crate::model::{
    AdditionalProperties, ArrayNode, CompositeNode, Discriminator, ExclusionNode, ExclusiveBound,
    Modifiers, ObjectNode, PrimitiveNode, PrimitiveType, Property, SchemaNode, UnionDiscriminator,
    UnionKind, UnionNode,
};
use crate::ref_utils::mapping_target_pointer;
use serde_json::{Map, Value};
use std::collections::HashSet;

type Object = Map<String, Value>;

impl Parser<'_> {
    /// Parses a schema found at `at`.
    pub(crate) fn parse_schema(&self, value: &Value, at: &str) -> AppResult<SchemaNode> {
        match value {
            Value::Bool(flag) => self.parse_boolean_schema(*flag, at),
            Value::Object(map) => {
                if let Some(reference) = fields::reference(map) {
                    return Ok(SchemaNode::Reference(reference));
                }
                let modifiers = self.parse_modifiers(map, at);
                self.parse_shape(map, modifiers, at)
            }
            other => Err(AppError::unrecognized(
                at,
                format!("expected a schema object, found {}", json_kind(other)),
            )),
        }
    }

    fn parse_boolean_schema(&self, flag: bool, at: &str) -> AppResult<SchemaNode> {
        if !self.dialect.boolean_schemas() {
            return Err(AppError::unrecognized(
                at,
                format!(
                    "boolean schemas are not part of OpenAPI {}",
                    self.dialect.version()
                ),
            ));
        }
        let any = SchemaNode::primitive(PrimitiveType::Any);
        Ok(if flag {
            any
        } else {
            SchemaNode::Exclusion(ExclusionNode {
                definition: Box::new(any),
                modifiers: Modifiers::default(),
            })
        })
    }

    fn parse_shape(&self, map: &Object, modifiers: Modifiers, at: &str) -> AppResult<SchemaNode> {
        let keyword = type_keyword(map);
        let type_name = match &keyword {
            TypeKeyword::Single(name) => Some(name.as_str()),
            _ => None,
        };

        if type_name == Some("array")
            || (keyword == TypeKeyword::Missing && map.contains_key("items"))
        {
            return self.parse_array(map, modifiers, at);
        }
        if let TypeKeyword::List(names) = &keyword {
            return self.parse_type_list(map, names, modifiers, at);
        }
        if let Some(list) = map.get("allOf") {
            let mut definitions = self.parse_alternatives(list, "allOf", at)?;
            if has_object_keywords(map) {
                definitions.push(self.parse_object(map, Modifiers::default(), at)?);
            }
            return Ok(SchemaNode::Composite(CompositeNode {
                definitions,
                modifiers,
            }));
        }
        if let Some(list) = map.get("anyOf") {
            return self.parse_union(list, "anyOf", UnionKind::Any, modifiers, at);
        }
        if let Some(list) = map.get("oneOf") {
            return self.parse_union(list, "oneOf", UnionKind::Xor, modifiers, at);
        }
        if let Some(inner) = map.get("not") {
            let definition = self.parse_schema(inner, &child(at, "not"))?;
            return Ok(SchemaNode::Exclusion(ExclusionNode {
                definition: Box::new(definition),
                modifiers,
            }));
        }
        let object_like = match type_name {
            Some(name) => name == "object",
            None => has_object_keywords(map),
        };
        if object_like {
            return self.parse_object(map, modifiers, at);
        }
        self.parse_primitive(type_name, modifiers, at)
    }

    fn parse_array(&self, map: &Object, modifiers: Modifiers, at: &str) -> AppResult<SchemaNode> {
        let items = match map.get("items") {
            Some(items) => self.parse_schema(items, &child(at, "items"))?,
            None => SchemaNode::primitive(PrimitiveType::Any),
        };
        Ok(SchemaNode::Array(ArrayNode {
            items: Box::new(items),
            modifiers,
        }))
    }

    /// `type: [a, b]` becomes a union of the per-type parses. The union keeps
    /// the modifier bag; each alternative only keeps its own shape.
    fn parse_type_list(
        &self,
        map: &Object,
        names: &[String],
        modifiers: Modifiers,
        at: &str,
    ) -> AppResult<SchemaNode> {
        self.dialect_feature(self.dialect.type_arrays(), at, "type arrays");
        let definitions = names
            .iter()
            .map(|name| {
                let mut narrowed = map.clone();
                narrowed.insert("type".to_string(), Value::String(name.clone()));
                self.parse_shape(&narrowed, Modifiers::default(), at)
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(SchemaNode::Union(UnionNode {
            kind: UnionKind::Any,
            definitions,
            discriminator: None,
            modifiers,
        }))
    }

    fn parse_alternatives(&self, list: &Value, keyword: &str, at: &str) -> AppResult<Vec<SchemaNode>> {
        let Some(items) = list.as_array() else {
            return Err(AppError::unrecognized(
                at,
                format!("'{}' must be a list of schemas", keyword),
            ));
        };
        let base = child(at, keyword);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.parse_schema(item, &child(&base, &i.to_string())))
            .collect()
    }

    fn parse_union(
        &self,
        list: &Value,
        keyword: &str,
        kind: UnionKind,
        mut modifiers: Modifiers,
        at: &str,
    ) -> AppResult<SchemaNode> {
        let definitions = self.parse_alternatives(list, keyword, at)?;
        let discriminator = modifiers.discriminator.take().map(lift_discriminator);
        Ok(SchemaNode::Union(UnionNode {
            kind,
            definitions,
            discriminator,
            modifiers,
        }))
    }

    fn parse_object(&self, map: &Object, modifiers: Modifiers, at: &str) -> AppResult<SchemaNode> {
        let required: HashSet<String> = fields::strings(map, "required").into_iter().collect();

        let mut properties = Vec::new();
        if let Some(declared) = map.get("properties") {
            let Some(declared) = declared.as_object() else {
                return Err(AppError::unrecognized(at, "'properties' must be a mapping"));
            };
            let base = child(at, "properties");
            for (name, value) in declared {
                let mut definition = self.parse_schema(value, &child(&base, name))?;
                let description = match &mut definition {
                    SchemaNode::Reference(r) => r.description.take(),
                    other => other.modifiers_mut().and_then(|m| m.description.take()),
                };
                properties.push(Property {
                    name: name.clone(),
                    required: required.contains(name),
                    description,
                    definition,
                });
            }
        }

        let additional_properties = match map.get("additionalProperties") {
            None => None,
            Some(Value::Bool(flag)) => Some(AdditionalProperties::Flag(*flag)),
            Some(schema) => Some(AdditionalProperties::Schema(Box::new(
                self.parse_schema(schema, &child(at, "additionalProperties"))?,
            ))),
        };

        Ok(SchemaNode::Object(ObjectNode {
            properties,
            additional_properties,
            modifiers,
        }))
    }

    fn parse_primitive(
        &self,
        type_name: Option<&str>,
        modifiers: Modifiers,
        at: &str,
    ) -> AppResult<SchemaNode> {
        let primitive = match type_name {
            Some(name) => PrimitiveType::from_type_name(name).ok_or_else(|| {
                AppError::unrecognized(at, format!("unknown type '{}'", name))
            })?,
            None => modifiers
                .enum_values
                .as_deref()
                .and_then(infer_enum_type)
                .unwrap_or(PrimitiveType::Any),
        };
        Ok(SchemaNode::Primitive(PrimitiveNode {
            primitive,
            modifiers,
        }))
    }

    fn parse_modifiers(&self, map: &Object, at: &str) -> Modifiers {
        let mut modifiers = Modifiers {
            title: fields::string(map, "title"),
            description: fields::string(map, "description"),
            format: fields::string(map, "format"),
            default: map.get("default").cloned(),
            example: map.get("example").cloned().or_else(|| {
                map.get("examples")
                    .and_then(Value::as_array)
                    .and_then(|examples| examples.first())
                    .cloned()
            }),
            minimum: fields::number(map, "minimum"),
            maximum: fields::number(map, "maximum"),
            exclusive_minimum: self.parse_exclusive_bound(map, "exclusiveMinimum", at),
            exclusive_maximum: self.parse_exclusive_bound(map, "exclusiveMaximum", at),
            multiple_of: fields::number(map, "multipleOf"),
            min_length: fields::count(map, "minLength"),
            max_length: fields::count(map, "maxLength"),
            pattern: fields::string(map, "pattern"),
            min_items: fields::count(map, "minItems"),
            max_items: fields::count(map, "maxItems"),
            unique_items: fields::boolean(map, "uniqueItems"),
            min_properties: fields::count(map, "minProperties"),
            max_properties: fields::count(map, "maxProperties"),
            enum_values: map.get("enum").and_then(Value::as_array).cloned(),
            nullable: fields::boolean(map, "nullable"),
            read_only: fields::boolean(map, "readOnly"),
            write_only: fields::boolean(map, "writeOnly"),
            deprecated: fields::boolean(map, "deprecated"),
            discriminator: parse_discriminator(map),
            extensions: fields::extensions(map),
        };

        if modifiers.nullable.is_some() {
            self.dialect_feature(self.dialect.nullable_keyword(), at, "nullable");
        }
        if let Some(constant) = map.get("const") {
            self.dialect_feature(self.dialect.const_keyword(), at, "const");
            if modifiers.enum_values.is_none() {
                modifiers.enum_values = Some(vec![constant.clone()]);
            }
        }
        modifiers
    }

    fn parse_exclusive_bound(&self, map: &Object, key: &str, at: &str) -> Option<ExclusiveBound> {
        match map.get(key)? {
            Value::Bool(flag) => {
                self.dialect_feature(!self.dialect.numeric_exclusive_bounds(), at, "boolean exclusive bounds");
                Some(ExclusiveBound::Flag(*flag))
            }
            Value::Number(n) => {
                self.dialect_feature(self.dialect.numeric_exclusive_bounds(), at, "numeric exclusive bounds");
                n.as_f64().map(ExclusiveBound::Value)
            }
            _ => None,
        }
    }
}

fn parse_discriminator(map: &Object) -> Option<Discriminator> {
    let raw = fields::object(map, "discriminator")?;
    let property_name = fields::string(raw, "propertyName")?;
    let mapping = fields::object(raw, "mapping")
        .map(|m| {
            m.iter()
                .filter_map(|(k, v)| v.as_str().map(|target| (k.clone(), target.to_string())))
                .collect()
        })
        .unwrap_or_default();
    Some(Discriminator {
        property_name,
        mapping,
    })
}

fn lift_discriminator(raw: Discriminator) -> UnionDiscriminator {
    UnionDiscriminator {
        property_name: raw.property_name,
        mapping: raw
            .mapping
            .into_iter()
            .map(|(value, target)| (value, SchemaNode::reference(mapping_target_pointer(&target))))
            .collect(),
    }
}

fn has_object_keywords(map: &Object) -> bool {
    map.contains_key("properties") || map.contains_key("additionalProperties")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
