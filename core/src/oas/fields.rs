//! Accessors for reading loosely-typed fields out of a raw JSON object.

use crate::model::ReferenceNode;
use crate::ref_utils::{canonical_pointer, encode_pointer_segment};
use indexmap::IndexMap;
use serde_json::{Map, Value};

pub(crate) fn string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn boolean(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

pub(crate) fn number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

pub(crate) fn count(map: &Map<String, Value>, key: &str) -> Option<u64> {
    map.get(key).and_then(Value::as_u64)
}

pub(crate) fn object<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

pub(crate) fn strings(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Collects every `x-` prefixed key.
pub(crate) fn extensions(map: &Map<String, Value>) -> IndexMap<String, Value> {
    map.iter()
        .filter(|(k, _)| k.starts_with("x-"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Reads a Reference Object (`$ref` plus the 3.1 `summary`/`description` siblings).
pub(crate) fn reference(map: &Map<String, Value>) -> Option<ReferenceNode> {
    let pointer = canonical_pointer(map.get("$ref")?.as_str()?);
    Some(ReferenceNode {
        pointer,
        summary: string(map, "summary"),
        description: string(map, "description"),
    })
}

/// Appends one escaped segment to a JSON pointer.
pub(crate) fn child(at: &str, segment: &str) -> String {
    format!("{}/{}", at, encode_pointer_segment(segment))
}
