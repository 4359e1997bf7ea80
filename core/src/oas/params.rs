//! # Parameters and Headers
//!
//! Header Objects share the Parameter Object's serialization fields minus
//! `name` and `in`, so both are parsed here. A declaration that carries
//! neither `schema` nor `content` gets a `void` placeholder definition.

use super::fields::{self, child};
use super::Parser;
use crate::error::AppResult;
use crate::model::{
    Header, Parameter, ParameterLocation, ParameterStyle, PrimitiveType, RefOr, SchemaNode,
    Visibility,
};
use indexmap::IndexMap;
use serde_json::Value;

impl Parser<'_> {
    pub(crate) fn parse_parameters(
        &self,
        value: Option<&Value>,
        at: &str,
    ) -> AppResult<Vec<RefOr<Parameter>>> {
        let Some(items) = value.and_then(Value::as_array) else {
            return Ok(Vec::new());
        };
        let base = child(at, "parameters");
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.parse_parameter(item, &child(&base, &i.to_string())))
            .collect()
    }

    pub(crate) fn parse_parameter(&self, value: &Value, at: &str) -> AppResult<RefOr<Parameter>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Parameter is not a mapping, using a placeholder");
            return Ok(RefOr::Item(placeholder_parameter()));
        };
        if let Some(reference) = fields::reference(map) {
            return Ok(RefOr::Reference(reference));
        }

        let name = fields::string(map, "name").unwrap_or_else(|| {
            self.warn(at, "Parameter has no name");
            String::new()
        });
        let location = fields::string(map, "in")
            .as_deref()
            .and_then(ParameterLocation::parse)
            .unwrap_or_else(|| {
                self.warn(at, "Parameter has no valid 'in', assuming query");
                ParameterLocation::Query
            });
        let required = fields::boolean(map, "required").unwrap_or(location == ParameterLocation::Path);
        let content = self.parse_content(map.get("content"), Visibility::Full, at)?;
        let definition = self.parse_value_schema(map.get("schema"), content.is_empty(), at)?;

        Ok(RefOr::Item(Parameter {
            name,
            location,
            description: fields::string(map, "description"),
            required,
            deprecated: fields::boolean(map, "deprecated").unwrap_or(false),
            style: fields::string(map, "style")
                .as_deref()
                .and_then(ParameterStyle::parse),
            explode: fields::boolean(map, "explode"),
            allow_reserved: fields::boolean(map, "allowReserved"),
            definition,
            content,
        }))
    }

    pub(crate) fn parse_headers(
        &self,
        value: Option<&Value>,
        at: &str,
    ) -> AppResult<IndexMap<String, RefOr<Header>>> {
        let mut headers = IndexMap::new();
        let Some(entries) = value.and_then(Value::as_object) else {
            return Ok(headers);
        };
        let base = child(at, "headers");
        for (name, raw) in entries {
            headers.insert(name.clone(), self.parse_header(raw, &child(&base, name))?);
        }
        Ok(headers)
    }

    pub(crate) fn parse_header(&self, value: &Value, at: &str) -> AppResult<RefOr<Header>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Header is not a mapping, using a placeholder");
            return Ok(RefOr::Item(Header {
                description: None,
                required: false,
                deprecated: false,
                style: None,
                explode: None,
                definition: Some(SchemaNode::primitive(PrimitiveType::Void)),
                content: Default::default(),
            }));
        };
        if let Some(reference) = fields::reference(map) {
            return Ok(RefOr::Reference(reference));
        }

        let content = self.parse_content(map.get("content"), Visibility::Full, at)?;
        let definition = self.parse_value_schema(map.get("schema"), content.is_empty(), at)?;
        Ok(RefOr::Item(Header {
            description: fields::string(map, "description"),
            required: fields::boolean(map, "required").unwrap_or(false),
            deprecated: fields::boolean(map, "deprecated").unwrap_or(false),
            style: fields::string(map, "style")
                .as_deref()
                .and_then(ParameterStyle::parse),
            explode: fields::boolean(map, "explode"),
            definition,
            content,
        }))
    }

    fn parse_value_schema(
        &self,
        schema: Option<&Value>,
        needs_placeholder: bool,
        at: &str,
    ) -> AppResult<Option<SchemaNode>> {
        match schema {
            Some(schema) => Ok(Some(self.parse_schema(schema, &child(at, "schema"))?)),
            None if needs_placeholder => {
                self.warn(at, "Declaration has neither 'schema' nor 'content', using void");
                Ok(Some(SchemaNode::primitive(PrimitiveType::Void)))
            }
            None => Ok(None),
        }
    }
}

fn placeholder_parameter() -> Parameter {
    Parameter {
        name: String::new(),
        location: ParameterLocation::Query,
        description: None,
        required: false,
        deprecated: false,
        style: None,
        explode: None,
        allow_reserved: None,
        definition: Some(SchemaNode::primitive(PrimitiveType::Void)),
        content: Default::default(),
    }
}
