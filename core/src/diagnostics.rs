//! # Diagnostics
//!
//! Severity-leveled reporting for recoverable conditions: unresolved
//! references, duplicate components, tag-less operations and unsupported
//! feature paths. The pipeline never aborts on these; it reports them to the
//! caller-supplied sink and falls back to a best-effort result.

use std::cell::RefCell;
use std::fmt;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Tracing detail (e.g. a feature path that passes nodes through).
    Debug,
    /// Informational.
    Info,
    /// Something was skipped or defaulted.
    Warning,
    /// Something is broken but the run continued.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// A single structured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Message text.
    pub message: String,
    /// Pointer of the node the message is about, when known.
    pub pointer: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic without a location.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            pointer: None,
        }
    }

    /// Attaches the pointer of the node this diagnostic is about.
    pub fn at(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pointer {
            Some(p) => write!(f, "[{}] {} ({})", self.severity, self.message, p),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Receiver of diagnostics.
///
/// Any `Fn(&Diagnostic)` closure is a sink.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: Diagnostic) {
        self(&diagnostic)
    }
}

/// Convenience reporting helpers usable on `&dyn DiagnosticSink`.
pub(crate) fn warn(sink: &dyn DiagnosticSink, pointer: &str, message: impl Into<String>) {
    sink.report(Diagnostic::new(Severity::Warning, message).at(pointer));
}

pub(crate) fn debug(sink: &dyn DiagnosticSink, pointer: &str, message: impl Into<String>) {
    sink.report(Diagnostic::new(Severity::Debug, message).at(pointer));
}

/// Forwards diagnostics to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        let pointer = diagnostic.pointer.as_deref().unwrap_or("");
        match diagnostic.severity {
            Severity::Debug => tracing::debug!(pointer, "{}", diagnostic.message),
            Severity::Info => tracing::info!(pointer, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(pointer, "{}", diagnostic.message),
            Severity::Error => tracing::error!(pointer, "{}", diagnostic.message),
        }
    }
}

/// Buffers every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    /// Returns the diagnostics at or above `severity`.
    pub fn at_least(&self, severity: Severity) -> Vec<Diagnostic> {
        self.entries
            .borrow()
            .iter()
            .filter(|d| d.severity >= severity)
            .cloned()
            .collect()
    }

    /// True when any reported message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|d| d.message.contains(needle))
    }

    /// Consumes the sink and returns the buffered diagnostics.
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.entries.into_inner()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_filters_by_severity() {
        let sink = CollectingSink::new();
        warn(&sink, "#/a", "missing thing");
        debug(&sink, "#/b", "pass through");
        assert_eq!(sink.diagnostics().len(), 2);
        let warnings = sink.at_least(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].pointer.as_deref(), Some("#/a"));
        assert!(sink.contains("pass through"));
    }

    #[test]
    fn test_closure_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.severity);
        sink.report(Diagnostic::new(Severity::Error, "boom"));
        sink.report(Diagnostic::new(Severity::Debug, "detail"));
        assert_eq!(*seen.borrow(), vec![Severity::Error, Severity::Debug]);
    }

    #[test]
    fn test_display_includes_pointer() {
        let d = Diagnostic::new(Severity::Warning, "unresolved").at("#/components/schemas/X");
        assert_eq!(d.to_string(), "[warning] unresolved (#/components/schemas/X)");
    }
}
