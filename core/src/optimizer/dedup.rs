//! # Deduplication
//!
//! Collapses component entries sharing a `reference_name`. Equal definitions
//! merge silently; differing ones keep the first entry and report a warning.

use crate::config::OptimizerOptions;
use crate::diagnostics::{debug, warn, DiagnosticSink};
use crate::model::{Component, Components};

/// Deduplicates parameters and path items, and models when enabled.
pub fn dedupe_components(
    components: &mut Components,
    options: &OptimizerOptions,
    sink: &dyn DiagnosticSink,
) {
    dedupe_section(&mut components.parameters, sink);
    dedupe_section(&mut components.path_items, sink);
    if options.dedupe_models {
        dedupe_section(&mut components.models, sink);
    }
}

/// Keeps the first entry per `reference_name`, in order.
pub fn dedupe_section<T: PartialEq>(entries: &mut Vec<Component<T>>, sink: &dyn DiagnosticSink) {
    let mut kept: Vec<Component<T>> = Vec::with_capacity(entries.len());
    for entry in entries.drain(..) {
        match kept
            .iter()
            .find(|k| k.reference_name == entry.reference_name)
        {
            Some(first) if first.definition == entry.definition => {
                debug(sink, &entry.reference_name, "Dropped duplicate component");
            }
            Some(_) => warn(
                sink,
                &entry.reference_name,
                "Conflicting definitions share a reference name, keeping the first",
            ),
            None => kept.push(entry),
        }
    }
    *entries = kept;
}
