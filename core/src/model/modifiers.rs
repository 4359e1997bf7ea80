//! # Modifiers
//!
//! The metadata and constraint bag carried by every schema node.
//!
//! Equality is semantic rather than structural (see the `PartialEq` impl):
//! `enum` compares as a set, the exclusive bounds compare across the 3.0
//! boolean form and the 3.1 numeric form, and map-valued fields ignore key
//! order.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// `exclusiveMinimum` / `exclusiveMaximum` as written in the source document.
///
/// OpenAPI 3.0 uses a boolean that turns `minimum`/`maximum` exclusive;
/// OpenAPI 3.1 uses the bound itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    /// 3.0 form.
    Flag(bool),
    /// 3.1 form.
    Value(f64),
}

/// Raw discriminator metadata found on a non-union schema.
///
/// Union nodes lift this into [`UnionDiscriminator`](super::schema::UnionDiscriminator).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Name of the property whose value selects the variant.
    pub property_name: String,
    /// Discriminator value -> reference pointer.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
}

/// Metadata and constraints attached to a schema node.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    /// `title`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `format`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// `example` (or the first entry of a 3.1 `examples` array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// `minimum`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// `maximum`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// `exclusiveMinimum`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<ExclusiveBound>,
    /// `exclusiveMaximum`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<ExclusiveBound>,
    /// `multipleOf`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    /// `minLength`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// `maxLength`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// `pattern`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// `minItems`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// `maxItems`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// `uniqueItems`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    /// `minProperties`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    /// `maxProperties`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    /// `enum` (3.1 `const` is folded in as a single value).
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// `nullable` (3.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// `readOnly`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// `writeOnly`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,
    /// `deprecated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// `discriminator` on a schema that is not itself a union.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    /// Vendor extensions (`x-*`).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, Value>,
}

impl Modifiers {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Modifiers::default()
    }

    /// True when the bag carries nothing but documentation text.
    pub fn is_documentation_only(&self) -> bool {
        let stripped = Modifiers {
            title: None,
            description: None,
            ..self.clone()
        };
        stripped.is_empty()
    }

    /// `readOnly: true`
    pub fn is_read_only(&self) -> bool {
        self.read_only == Some(true)
    }

    /// `writeOnly: true`
    pub fn is_write_only(&self) -> bool {
        self.write_only == Some(true)
    }

    /// Lower bound normalized to `(inclusive, exclusive)` regardless of dialect.
    pub fn lower_bound(&self) -> (Option<f64>, Option<f64>) {
        normalize_bound(self.minimum, self.exclusive_minimum)
    }

    /// Upper bound normalized to `(inclusive, exclusive)` regardless of dialect.
    pub fn upper_bound(&self) -> (Option<f64>, Option<f64>) {
        normalize_bound(self.maximum, self.exclusive_maximum)
    }
}

fn normalize_bound(
    inclusive: Option<f64>,
    exclusive: Option<ExclusiveBound>,
) -> (Option<f64>, Option<f64>) {
    match exclusive {
        Some(ExclusiveBound::Flag(true)) => (None, inclusive),
        Some(ExclusiveBound::Value(v)) => (inclusive, Some(v)),
        Some(ExclusiveBound::Flag(false)) | None => (inclusive, None),
    }
}

/// Order-insensitive comparison of `enum` lists.
fn enum_values_eq(a: &Option<Vec<Value>>, b: &Option<Vec<Value>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.len() == b.len() && a.iter().all(|v| b.contains(v)) && b.iter().all(|v| a.contains(v))
        }
        _ => false,
    }
}

impl PartialEq for Modifiers {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.format == other.format
            && self.default == other.default
            && self.example == other.example
            && self.lower_bound() == other.lower_bound()
            && self.upper_bound() == other.upper_bound()
            && self.multiple_of == other.multiple_of
            && self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.pattern == other.pattern
            && self.min_items == other.min_items
            && self.max_items == other.max_items
            && self.unique_items == other.unique_items
            && self.min_properties == other.min_properties
            && self.max_properties == other.max_properties
            && enum_values_eq(&self.enum_values, &other.enum_values)
            && self.nullable == other.nullable
            && self.read_only == other.read_only
            && self.write_only == other.write_only
            && self.deprecated == other.deprecated
            // IndexMap equality ignores insertion order.
            && self.discriminator == other.discriminator
            && self.extensions == other.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_equality_ignores_order() {
        let a = Modifiers {
            enum_values: Some(vec![json!("a"), json!("b")]),
            ..Default::default()
        };
        let b = Modifiers {
            enum_values: Some(vec![json!("b"), json!("a")]),
            ..Default::default()
        };
        let c = Modifiers {
            enum_values: Some(vec![json!("a")]),
            ..Default::default()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_exclusive_bound_forms_are_equal() {
        let v30 = Modifiers {
            minimum: Some(5.0),
            exclusive_minimum: Some(ExclusiveBound::Flag(true)),
            ..Default::default()
        };
        let v31 = Modifiers {
            exclusive_minimum: Some(ExclusiveBound::Value(5.0)),
            ..Default::default()
        };
        assert_eq!(v30, v31);

        let inclusive = Modifiers {
            minimum: Some(5.0),
            exclusive_minimum: Some(ExclusiveBound::Flag(false)),
            ..Default::default()
        };
        let plain = Modifiers {
            minimum: Some(5.0),
            ..Default::default()
        };
        assert_eq!(inclusive, plain);
        assert_ne!(inclusive, v31);
    }

    #[test]
    fn test_extensions_ignore_order() {
        let mut a = Modifiers::default();
        a.extensions.insert("x-a".into(), json!(1));
        a.extensions.insert("x-b".into(), json!(2));
        let mut b = Modifiers::default();
        b.extensions.insert("x-b".into(), json!(2));
        b.extensions.insert("x-a".into(), json!(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_documentation_only() {
        let docs = Modifiers {
            description: Some("d".into()),
            ..Default::default()
        };
        assert!(docs.is_documentation_only());
        assert!(!docs.is_empty());
        let nullable = Modifiers {
            nullable: Some(true),
            ..docs
        };
        assert!(!nullable.is_documentation_only());
    }
}
