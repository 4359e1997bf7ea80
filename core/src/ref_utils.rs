#![deny(missing_docs)]

//! # Reference Utilities
//!
//! The pointer grammar shared by every stage:
//!
//! - `#/components/<section>/<name>` for user-declared components,
//! - `#/components/generated/<kind>/<name>` for hoisted fragments.
//!
//! `generated` is not an OpenAPI component section, so the two namespaces
//! never collide.

use crate::model::Section;
use percent_encoding::percent_decode_str;

/// Segment that introduces the hoisted-fragment namespace.
pub const GENERATED_SEGMENT: &str = "generated";

/// Builds the canonical pointer of a user-declared component.
pub fn component_pointer(section: Section, name: &str) -> String {
    format!("#/components/{}/{}", section.key(), encode_pointer_segment(name))
}

/// Builds the pointer of a hoisted fragment.
pub fn generated_pointer(kind: &str, name: &str) -> String {
    format!(
        "#/components/{}/{}/{}",
        GENERATED_SEGMENT,
        kind,
        encode_pointer_segment(name)
    )
}

/// Extracts a component name from a `$ref` if it points to `#/components/{section}/{name}`.
pub fn extract_component_name(ref_str: &str, section: Section) -> Option<String> {
    let pointer = ref_str.strip_prefix('#')?.trim_start_matches('/');
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 {
        return None;
    }
    if segments[0] != "components" || segments[1] != section.key() {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Rewrites a component `$ref` into the canonical pointer its target is
/// registered under. `%20` and `~1` spellings of the same name resolve to one
/// pointer; anything that is not a component pointer is returned unchanged.
pub fn canonical_pointer(ref_str: &str) -> String {
    Section::ALL
        .into_iter()
        .find_map(|section| {
            extract_component_name(ref_str, section).map(|name| component_pointer(section, &name))
        })
        .unwrap_or_else(|| ref_str.to_string())
}

/// Expands a discriminator mapping target into a pointer.
///
/// Mapping values are either pointers or bare schema names.
pub fn mapping_target_pointer(target: &str) -> String {
    if target.contains('#') || target.contains('/') {
        canonical_pointer(target)
    } else {
        component_pointer(Section::Models, target)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Encodes a JSON Pointer segment (inverse of [`decode_pointer_segment`] for `~` and `/`).
pub fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_pointer() {
        assert_eq!(
            component_pointer(Section::Models, "Pet"),
            "#/components/schemas/Pet"
        );
        assert_eq!(
            component_pointer(Section::RequestBodies, "a/b"),
            "#/components/requestBodies/a~1b"
        );
    }

    #[test]
    fn test_generated_namespace_is_disjoint() {
        let generated = generated_pointer("query", "ListPetsQueryParameters");
        assert_eq!(
            generated,
            "#/components/generated/query/ListPetsQueryParameters"
        );
        assert_eq!(extract_component_name(&generated, Section::Models), None);
        assert_eq!(canonical_pointer(&generated), generated);
    }

    #[test]
    fn test_extract_component_name_success() {
        let name = extract_component_name("#/components/parameters/Limit", Section::Parameters);
        assert_eq!(name.as_deref(), Some("Limit"));
    }

    #[test]
    fn test_extract_component_name_wrong_section() {
        let name = extract_component_name("#/components/responses/Limit", Section::Parameters);
        assert!(name.is_none());
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let decoded = decode_pointer_segment("User%20Profile~1details");
        assert_eq!(decoded, "User Profile/details");
    }

    #[test]
    fn test_canonical_pointer() {
        assert_eq!(
            canonical_pointer("#/components/schemas/User%20Profile"),
            "#/components/schemas/User Profile"
        );
        assert_eq!(
            canonical_pointer("#/components/parameters/a~1b"),
            "#/components/parameters/a~1b"
        );
        assert_eq!(
            canonical_pointer("other.yaml#/Pet"),
            "other.yaml#/Pet"
        );
    }

    #[test]
    fn test_mapping_target_pointer() {
        assert_eq!(mapping_target_pointer("Cat"), "#/components/schemas/Cat");
        assert_eq!(
            mapping_target_pointer("#/components/schemas/Dog"),
            "#/components/schemas/Dog"
        );
    }
}
