#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helpers for deriving identifier-safe names from document titles, operation
//! ids and paths.

use crate::model::HttpMethod;
use regex::Regex;
use std::sync::OnceLock;

/// Converts free text (`list_pets`, `listPets`, `Swagger Petstore`) to PascalCase.
///
/// Every run of ASCII letters and digits is a word; the first letter of each
/// word is upper-cased and the rest is kept as written.
pub fn to_pascal_case(s: &str) -> String {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    let word_re = WORD_RE.get_or_init(|| Regex::new(r"[A-Za-z0-9]+").expect("Invalid regex"));

    let mut result = String::with_capacity(s.len());
    for word in word_re.find_iter(s) {
        let mut chars = word.as_str().chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Derives an operation name from the HTTP method and URL path when `operationId` is missing.
///
/// e.g. `GET /users/{id}` -> `GetUsersId`
pub fn derive_operation_name(method: HttpMethod, path: &str) -> String {
    to_pascal_case(&format!("{} {}", method.as_str(), path))
}
