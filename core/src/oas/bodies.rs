//! # Request Bodies, Responses and Links

use super::fields::{self, child};
use super::Parser;
use crate::error::AppResult;
use crate::model::{Link, RefOr, RequestBody, Response, Visibility};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

impl Parser<'_> {
    pub(crate) fn parse_request_body(&self, value: &Value, at: &str) -> AppResult<RefOr<RequestBody>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Request body is not a mapping, treating it as empty");
            return Ok(RefOr::Item(RequestBody {
                description: None,
                required: false,
                content: Default::default(),
                extensions: Default::default(),
            }));
        };
        if let Some(reference) = fields::reference(map) {
            return Ok(RefOr::Reference(reference));
        }
        Ok(RefOr::Item(RequestBody {
            description: fields::string(map, "description"),
            required: fields::boolean(map, "required").unwrap_or(false),
            content: self.parse_content(map.get("content"), Visibility::Write, at)?,
            extensions: fields::extensions(map),
        }))
    }

    pub(crate) fn parse_responses(
        &self,
        value: Option<&Value>,
        at: &str,
    ) -> AppResult<IndexMap<String, RefOr<Response>>> {
        let mut responses = IndexMap::new();
        let Some(entries) = value.and_then(Value::as_object) else {
            self.warn(at, "Operation has no responses");
            return Ok(responses);
        };
        let base = child(at, "responses");
        for (status, raw) in entries {
            if status.starts_with("x-") {
                continue;
            }
            let pointer = child(&base, status);
            if !is_status_key(status) {
                self.warn(&pointer, format!("Unexpected response key '{}'", status));
            }
            responses.insert(status.clone(), self.parse_response(raw, &pointer)?);
        }
        Ok(responses)
    }

    pub(crate) fn parse_response(&self, value: &Value, at: &str) -> AppResult<RefOr<Response>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Response is not a mapping, treating it as empty");
            return Ok(RefOr::Item(Response {
                description: None,
                headers: Default::default(),
                content: Default::default(),
                links: Default::default(),
                extensions: Default::default(),
            }));
        };
        if let Some(reference) = fields::reference(map) {
            return Ok(RefOr::Reference(reference));
        }

        let mut links = IndexMap::new();
        if let Some(raw) = fields::object(map, "links") {
            let base = child(at, "links");
            for (name, link) in raw {
                if let Some(link) = self.parse_link(link, &child(&base, name)) {
                    links.insert(name.clone(), link);
                }
            }
        }

        Ok(RefOr::Item(Response {
            description: fields::string(map, "description"),
            headers: self.parse_headers(map.get("headers"), at)?,
            content: self.parse_content(map.get("content"), Visibility::Read, at)?,
            links,
            extensions: fields::extensions(map),
        }))
    }

    pub(crate) fn parse_link(&self, value: &Value, at: &str) -> Option<RefOr<Link>> {
        let Some(map) = value.as_object() else {
            self.warn(at, "Link is not a mapping, skipping it");
            return None;
        };
        if let Some(reference) = fields::reference(map) {
            return Some(RefOr::Reference(reference));
        }
        let link = Link {
            operation_id: fields::string(map, "operationId"),
            operation_ref: fields::string(map, "operationRef"),
            parameters: fields::object(map, "parameters")
                .map(|p| p.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default(),
            request_body: map.get("requestBody").cloned(),
            description: fields::string(map, "description"),
        };
        if link.operation_id.is_none() && link.operation_ref.is_none() {
            self.warn(at, "Link names neither 'operationId' nor 'operationRef'");
        }
        Some(RefOr::Item(link))
    }
}

/// `default`, a concrete status code or a range like `4XX`.
fn is_status_key(key: &str) -> bool {
    static STATUS_RE: OnceLock<Regex> = OnceLock::new();
    let status_re = STATUS_RE
        .get_or_init(|| Regex::new(r"^(default|[1-5][0-9]{2}|[1-5][xX]{2})$").expect("Invalid regex"));
    status_re.is_match(key)
}
