//! Diagnostic queue.
//!
//! The processor's half of the host messager channel: components push
//! diagnostics during a round, the driver drains and renders them at the
//! end. Entries record their origin file and line so the emitter does not
//! need the source text at render time.

use std::path::{Path, PathBuf};

use crate::{span_utils, Diagnostic};

/// Resolved origin of a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Origin {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
    /// The source line the primary label points at, for rendering.
    pub line_text: String,
}

/// A queued diagnostic plus its origin, when one is known.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Entry {
    pub diagnostic: Diagnostic,
    pub origin: Option<Origin>,
}

/// Collects diagnostics for one processing run.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    entries: Vec<Entry>,
    errors: usize,
    warnings: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        DiagnosticQueue::default()
    }

    fn count(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            crate::Severity::Error => self.errors += 1,
            crate::Severity::Warning => self.warnings += 1,
            crate::Severity::Note => {}
        }
    }

    /// Queue a diagnostic with no source origin.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.count(&diagnostic);
        self.entries.push(Entry {
            diagnostic,
            origin: None,
        });
    }

    /// Queue a diagnostic against a source file, resolving the primary
    /// span to a line and column.
    pub fn push_at(&mut self, diagnostic: Diagnostic, path: &Path, source: &str) {
        self.count(&diagnostic);
        let origin = diagnostic.primary_span().map(|span| {
            let (line, column) = span_utils::span_line_col(source, span);
            Origin {
                path: path.to_path_buf(),
                line,
                column,
                line_text: span_utils::line_text(source, span.start).to_string(),
            }
        });
        self.entries.push(Entry { diagnostic, origin });
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Drain all entries, leaving the queue empty but keeping the counts.
    pub fn drain(&mut self) -> Vec<Entry> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, ErrorCode};
    use mallard_ir::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_by_severity() {
        let mut queue = DiagnosticQueue::new();
        queue.push(Diagnostic::error(ErrorCode::E3001).with_message("missing"));
        queue.push(Diagnostic::warning(ErrorCode::E2001).with_message("skipped"));
        queue.push(Diagnostic::note().with_message("progress"));

        assert_eq!(queue.error_count(), 1);
        assert_eq!(queue.warning_count(), 1);
        assert!(queue.has_errors());
        assert_eq!(queue.entries().len(), 3);
    }

    #[test]
    fn push_at_resolves_line_and_column() {
        let source = "package a.b;\nclass X {}\n";
        let span_start = source.find("X").map(|i| i as u32).unwrap_or(0);
        let mut queue = DiagnosticQueue::new();
        queue.push_at(
            Diagnostic::error(ErrorCode::E2001)
                .with_message("misapplied")
                .with_label(Span::new(span_start, span_start + 1), "here"),
            Path::new("a/b/X.java"),
            source,
        );

        let entry = &queue.entries()[0];
        let origin = entry.origin.as_ref().map(|o| (o.line, o.column));
        assert_eq!(origin, Some((2, 7)));
    }

    #[test]
    fn drain_preserves_counts() {
        let mut queue = DiagnosticQueue::new();
        queue.push(Diagnostic::error(ErrorCode::E3006).with_message("io"));
        let drained = queue.drain();

        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
        assert_eq!(queue.error_count(), 1);
    }
}
