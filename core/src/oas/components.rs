//! # Components
//!
//! Fills the component table from `components`. Schemas are parsed on their
//! own first so that content parsing in the other sections can compute
//! omission views against them.

use super::fields::child;
use super::Parser;
use crate::error::AppResult;
use crate::model::{Component, Components, SchemaNode, Section};
use crate::ref_utils::component_pointer;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

impl Parser<'_> {
    pub(crate) fn parse_models(&self, components: Option<&Object>) -> AppResult<Vec<Component<SchemaNode>>> {
        self.parse_section(components, Section::Models, |value, at| {
            self.parse_schema(value, at).map(Some)
        })
    }

    /// Parses every section except schemas, which must already be in `self.models`.
    pub(crate) fn parse_components(&self, components: Option<&Object>) -> AppResult<Components> {
        if components.is_some_and(|c| c.contains_key(Section::PathItems.key())) {
            self.dialect_feature(
                self.dialect.path_item_components(),
                "#/components/pathItems",
                "components.pathItems",
            );
        }

        Ok(Components {
            models: Vec::new(),
            request_bodies: self.parse_section(components, Section::RequestBodies, |v, at| {
                self.parse_request_body(v, at).map(Some)
            })?,
            responses: self.parse_section(components, Section::Responses, |v, at| {
                self.parse_response(v, at).map(Some)
            })?,
            parameters: self.parse_section(components, Section::Parameters, |v, at| {
                self.parse_parameter(v, at).map(Some)
            })?,
            headers: self.parse_section(components, Section::Headers, |v, at| {
                self.parse_header(v, at).map(Some)
            })?,
            security_schemes: self.parse_section(components, Section::SecuritySchemes, |v, at| {
                Ok(self.parse_security_scheme(v, at))
            })?,
            links: self.parse_section(components, Section::Links, |v, at| {
                Ok(self.parse_link(v, at))
            })?,
            callbacks: self.parse_section(components, Section::Callbacks, |v, at| {
                self.parse_callback(v, at).map(Some)
            })?,
            path_items: self.parse_section(components, Section::PathItems, |v, at| {
                self.parse_path_item(v, at).map(Some)
            })?,
        })
    }

    fn parse_section<T>(
        &self,
        components: Option<&Object>,
        section: Section,
        parse: impl Fn(&Value, &str) -> AppResult<Option<T>>,
    ) -> AppResult<Vec<Component<T>>> {
        let Some(entries) = components
            .and_then(|c| c.get(section.key()))
            .and_then(Value::as_object)
        else {
            return Ok(Vec::new());
        };
        let base = child("#/components", section.key());
        let mut parsed = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            if name.is_empty() {
                self.warn(&base, "Component without a name, skipping it");
                continue;
            }
            let pointer = component_pointer(section, name);
            if let Some(definition) = parse(value, &child(&base, name))? {
                parsed.push(Component::new(name.clone(), pointer, definition));
            }
        }
        Ok(parsed)
    }
}
