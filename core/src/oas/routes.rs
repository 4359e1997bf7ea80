//! # Routes
//!
//! Paths, Path Item Objects, operations and callbacks.

use super::fields::{self, child};
use super::security::parse_security_requirements;
use super::Parser;
use crate::error::AppResult;
use crate::model::{Callback, HttpMethod, Operation, Path, PathItem, RefOr};
use indexmap::IndexMap;
use serde_json::{Map, Value};

impl Parser<'_> {
    pub(crate) fn parse_paths(&self, value: Option<&Value>) -> AppResult<Vec<Path>> {
        let Some(entries) = value.and_then(Value::as_object) else {
            return Ok(Vec::new());
        };
        let mut paths = Vec::with_capacity(entries.len());
        for (name, raw) in entries {
            if name.starts_with("x-") {
                continue;
            }
            paths.push(Path {
                name: name.clone(),
                item: self.parse_path_item(raw, &child("#/paths", name))?,
            });
        }
        Ok(paths)
    }

    pub(crate) fn parse_path_item(&self, value: &Value, at: &str) -> AppResult<RefOr<PathItem>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Path item is not a mapping, treating it as empty");
            return Ok(RefOr::Item(PathItem::default()));
        };
        if let Some(reference) = fields::reference(map) {
            return Ok(RefOr::Reference(reference));
        }

        let mut operations = Vec::new();
        for method in HttpMethod::ALL {
            let Some(raw) = map.get(method.as_str()) else {
                continue;
            };
            let pointer = child(at, method.as_str());
            match raw.as_object() {
                Some(op) => operations.push(self.parse_operation(method, op, &pointer)?),
                None => self.warn(&pointer, "Operation is not a mapping, skipping it"),
            }
        }

        Ok(RefOr::Item(PathItem {
            summary: fields::string(map, "summary"),
            description: fields::string(map, "description"),
            operations,
            parameters: self.parse_parameters(map.get("parameters"), at)?,
        }))
    }

    fn parse_operation(
        &self,
        method: HttpMethod,
        map: &Map<String, Value>,
        at: &str,
    ) -> AppResult<Operation> {
        let tags = fields::strings(map, "tags");
        if tags.is_empty() && self.options.require_tags {
            self.warn(at, format!("{} operation has no tags", method));
        }

        let request_body = match map.get("requestBody") {
            Some(raw) => Some(self.parse_request_body(raw, &child(at, "requestBody"))?),
            None => None,
        };

        let mut callbacks = IndexMap::new();
        if let Some(raw) = fields::object(map, "callbacks") {
            let base = child(at, "callbacks");
            for (name, callback) in raw {
                callbacks.insert(
                    name.clone(),
                    self.parse_callback(callback, &child(&base, name))?,
                );
            }
        }

        Ok(Operation {
            method,
            tags,
            operation_id: fields::string(map, "operationId"),
            summary: fields::string(map, "summary"),
            description: fields::string(map, "description"),
            deprecated: fields::boolean(map, "deprecated").unwrap_or(false),
            parameters: self.parse_parameters(map.get("parameters"), at)?,
            request_body,
            responses: self.parse_responses(map.get("responses"), at)?,
            callbacks,
            security: parse_security_requirements(map.get("security")),
        })
    }

    pub(crate) fn parse_callback(&self, value: &Value, at: &str) -> AppResult<RefOr<Callback>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Callback is not a mapping, treating it as empty");
            return Ok(RefOr::Item(Callback::default()));
        };
        if let Some(reference) = fields::reference(map) {
            return Ok(RefOr::Reference(reference));
        }
        let mut expressions = IndexMap::new();
        for (expression, item) in map {
            if expression.starts_with("x-") {
                continue;
            }
            expressions.insert(
                expression.clone(),
                self.parse_path_item(item, &child(at, expression))?,
            );
        }
        Ok(RefOr::Item(Callback { expressions }))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ParserOptions;
    use crate::diagnostics::CollectingSink;
    use crate::model::*;
    use crate::oas::{OpenApi30, Parser};
    use serde_json::json;

    #[test]
    fn test_operations_keep_method_order() {
        let options = ParserOptions::default();
        let sink = CollectingSink::new();
        let parser = Parser::new(&OpenApi30, &options, &sink);
        let raw = json!({
            "/pets": {
                "parameters": [{"name": "trace", "in": "header", "schema": {"type": "string"}}],
                "post": {"tags": ["pets"], "operationId": "createPets", "responses": {"201": {"description": "Created"}}},
                "get": {"tags": ["pets"], "operationId": "listPets", "responses": {"200": {"description": "OK"}}}
            }
        });
        let paths = parser.parse_paths(Some(&raw)).unwrap();
        assert_eq!(paths.len(), 1);
        let item = paths[0].item.as_item().unwrap();
        let methods: Vec<HttpMethod> = item.operations.iter().map(|o| o.method).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
        assert_eq!(item.parameters.len(), 1);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_tagless_operation_warns() {
        let options = ParserOptions::default();
        let sink = CollectingSink::new();
        let parser = Parser::new(&OpenApi30, &options, &sink);
        let raw = json!({"/health": {"get": {"responses": {"200": {"description": "OK"}}}}});
        parser.parse_paths(Some(&raw)).unwrap();
        assert!(sink.contains("GET operation has no tags"));

        let relaxed = ParserOptions {
            require_tags: false,
            ..Default::default()
        };
        let quiet = CollectingSink::new();
        Parser::new(&OpenApi30, &relaxed, &quiet)
            .parse_paths(Some(&raw))
            .unwrap();
        assert!(quiet.diagnostics().is_empty());
    }

    #[test]
    fn test_callbacks_hold_path_items() {
        let options = ParserOptions::default();
        let sink = CollectingSink::new();
        let parser = Parser::new(&OpenApi30, &options, &sink);
        let raw = json!({
            "/subscribe": {
                "post": {
                    "tags": ["hooks"],
                    "responses": {"201": {"description": "Subscribed"}},
                    "callbacks": {
                        "onEvent": {
                            "{$request.body#/url}": {
                                "post": {"responses": {"200": {"description": "OK"}}}
                            }
                        }
                    }
                }
            }
        });
        let paths = parser.parse_paths(Some(&raw)).unwrap();
        let op = &paths[0].item.as_item().unwrap().operations[0];
        let callback = op.callbacks["onEvent"].as_item().unwrap();
        let item = callback.expressions["{$request.body#/url}"].as_item().unwrap();
        assert_eq!(item.operations[0].method, HttpMethod::Post);
    }

    #[test]
    fn test_path_item_reference_is_kept() {
        let options = ParserOptions::default();
        let sink = CollectingSink::new();
        let parser = Parser::new(&OpenApi30, &options, &sink);
        let raw = json!({"/shared": {"$ref": "#/components/pathItems/Shared"}});
        let paths = parser.parse_paths(Some(&raw)).unwrap();
        assert!(paths[0].item.as_reference().is_some());
    }
}
