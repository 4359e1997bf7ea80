#![deny(missing_docs)]

//! # Reference Resolver
//!
//! Looks a pointer string up in a component table. The scan is linear over
//! every section and matches on `reference_name` equality. The first match
//! wins; further matches are reported as a warning. A miss is reported as a
//! warning too, and the caller decides whether that is fatal.

use crate::diagnostics::{warn, DiagnosticSink};
use crate::model::{Component, ComponentRef, Components, Parameter, RefOr, SchemaNode, Section};
use std::collections::HashSet;

/// Finds the component whose `reference_name` equals `pointer`.
pub fn find<'a>(
    components: &'a Components,
    pointer: &str,
    sink: &dyn DiagnosticSink,
) -> Option<ComponentRef<'a>> {
    let found = lookup(components, pointer, sink);
    if found.is_none() {
        warn(sink, pointer, "Unresolved reference");
    }
    found
}

/// Like [`find`], but a miss is silent.
///
/// Used where absence is an expected answer (e.g. probing whether a
/// generated name is already taken).
pub fn lookup<'a>(
    components: &'a Components,
    pointer: &str,
    sink: &dyn DiagnosticSink,
) -> Option<ComponentRef<'a>> {
    let mut matches = components
        .iter()
        .filter(|c| c.reference_name() == pointer);
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        warn(
            sink,
            pointer,
            format!(
                "Multiple definitions ({}) for reference, the first one in '{}' wins",
                extra + 1,
                first.section()
            ),
        );
    }
    Some(first)
}

/// Finds a schema component.
pub fn find_model<'a>(
    components: &'a Components,
    pointer: &str,
    sink: &dyn DiagnosticSink,
) -> Option<&'a Component<SchemaNode>> {
    match find(components, pointer, sink)? {
        ComponentRef::Model(c) => Some(c),
        other => {
            wrong_section(sink, pointer, Section::Models, other.section());
            None
        }
    }
}

fn wrong_section(sink: &dyn DiagnosticSink, pointer: &str, expected: Section, actual: Section) {
    warn(
        sink,
        pointer,
        format!("Reference points into '{}', expected '{}'", actual, expected),
    );
}

/// Follows a parameter reference chain to the inline declaration.
pub fn follow_parameter<'a>(
    components: &'a Components,
    value: &'a RefOr<Parameter>,
    sink: &dyn DiagnosticSink,
) -> Option<&'a Parameter> {
    let mut current = value;
    let mut visited = HashSet::new();
    loop {
        match current {
            RefOr::Item(item) => return Some(item),
            RefOr::Reference(r) => {
                if !visited.insert(r.pointer.as_str()) {
                    warn(sink, &r.pointer, "Reference cycle");
                    return None;
                }
                match find(components, &r.pointer, sink)? {
                    ComponentRef::Parameter(c) => current = &c.definition,
                    other => {
                        wrong_section(sink, &r.pointer, Section::Parameters, other.section());
                        return None;
                    }
                }
            }
        }
    }
}
