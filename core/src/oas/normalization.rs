#![deny(missing_docs)]

//! # Schema Normalization
//!
//! Small rewrites that bring version-specific spellings into one shape
//! before dispatch: `type` as a string or a list, and type inference for
//! `enum`/`const` schemas that omit `type`.

use crate::model::PrimitiveType;
use serde_json::{Map, Value};

/// The `type` keyword in either of its forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeKeyword {
    /// Absent.
    Missing,
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`, deduplicated in declaration order.
    List(Vec<String>),
}

/// Reads `type`, flattening a one-entry list into the single form.
pub(crate) fn type_keyword(map: &Map<String, Value>) -> TypeKeyword {
    match map.get("type") {
        Some(Value::String(name)) => TypeKeyword::Single(name.clone()),
        Some(Value::Array(items)) => {
            let mut names: Vec<String> = Vec::new();
            for name in items.iter().filter_map(Value::as_str) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
            match names.len() {
                0 => TypeKeyword::Missing,
                1 => TypeKeyword::Single(names.remove(0)),
                _ => TypeKeyword::List(names),
            }
        }
        _ => TypeKeyword::Missing,
    }
}

/// Infers a primitive type from enum values.
///
/// Mixed integer and fractional numbers widen to `number`; any other mix, or
/// an empty list, yields `None`. `null` entries are ignored.
pub(crate) fn infer_enum_type(values: &[Value]) -> Option<PrimitiveType> {
    let mut inferred: Option<PrimitiveType> = None;
    for value in values {
        let Some(next) = infer_schema_type(value) else {
            continue;
        };
        inferred = match (inferred, next) {
            (None, t) => Some(t),
            (Some(a), b) if a == b => Some(a),
            (Some(PrimitiveType::Integer), PrimitiveType::Number)
            | (Some(PrimitiveType::Number), PrimitiveType::Integer) => Some(PrimitiveType::Number),
            _ => return None,
        };
    }
    inferred
}

fn infer_schema_type(value: &Value) -> Option<PrimitiveType> {
    match value {
        Value::String(_) => Some(PrimitiveType::String),
        Value::Bool(_) => Some(PrimitiveType::Boolean),
        Value::Number(num) => {
            if num.is_i64() || num.is_u64() {
                Some(PrimitiveType::Integer)
            } else {
                Some(PrimitiveType::Number)
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyword(value: Value) -> TypeKeyword {
        type_keyword(value.as_object().unwrap())
    }

    #[test]
    fn test_type_keyword_forms() {
        assert_eq!(keyword(json!({})), TypeKeyword::Missing);
        assert_eq!(
            keyword(json!({"type": "string"})),
            TypeKeyword::Single("string".into())
        );
        assert_eq!(
            keyword(json!({"type": ["integer", "integer"]})),
            TypeKeyword::Single("integer".into())
        );
        assert_eq!(
            keyword(json!({"type": ["string", "null"]})),
            TypeKeyword::List(vec!["string".into(), "null".into()])
        );
    }

    #[test]
    fn test_infer_enum_type() {
        assert_eq!(
            infer_enum_type(&[json!("a"), json!("b")]),
            Some(PrimitiveType::String)
        );
        assert_eq!(
            infer_enum_type(&[json!(1), json!(2.5), Value::Null]),
            Some(PrimitiveType::Number)
        );
        assert_eq!(infer_enum_type(&[json!(1), json!("a")]), None);
        assert_eq!(infer_enum_type(&[]), None);
    }
}
