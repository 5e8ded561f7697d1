//! Text edit log.
//!
//! The mutable compilation unit is the original source text plus a log of
//! edits anchored at tree spans. Applying the log is the "canonical
//! printer": everything the rewriter did not touch survives byte for
//! byte, so imports, formatting, and prior annotations are preserved.
//!
//! Edits are applied in reverse position order so earlier offsets stay
//! valid while later text moves.

use mallard_ir::Span;

/// A single text edit against the original source.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TextEdit {
    /// The span to replace; empty for a pure insertion.
    pub span: Span,
    /// The replacement text.
    pub new_text: String,
}

impl TextEdit {
    /// Create an insertion at a specific byte offset.
    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        TextEdit {
            span: Span::new(at, at),
            new_text: text.into(),
        }
    }

    /// Create a replacement edit.
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: text.into(),
        }
    }

    /// Check if this edit is a pure insertion.
    pub fn is_insert(&self) -> bool {
        self.span.is_empty() && !self.new_text.is_empty()
    }
}

/// Accumulates edits and applies them in one pass.
#[derive(Clone, Debug, Default)]
pub struct ChangeTracker {
    edits: Vec<TextEdit>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        ChangeTracker::default()
    }

    /// Insert text at a byte offset.
    pub fn insert(&mut self, at: u32, text: impl Into<String>) {
        self.edits.push(TextEdit::insert(at, text));
    }

    /// Insert text directly after a span.
    pub fn insert_after(&mut self, span: Span, text: impl Into<String>) {
        self.edits.push(TextEdit::insert(span.end, text));
    }

    /// Replace the text at a span.
    pub fn replace(&mut self, span: Span, text: impl Into<String>) {
        self.edits.push(TextEdit::replace(span, text));
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Apply all edits to the source and return the modified text.
    ///
    /// Edits are applied from end to start so positions never shift under
    /// pending edits. Insertions at the same offset keep their push order.
    pub fn apply(&self, source: &str) -> String {
        if self.edits.is_empty() {
            return source.to_string();
        }

        let mut sorted = self.edits.clone();
        // Stable sort, descending by position: equal-offset insertions
        // stay in push order, and reversing the application preserves it.
        sorted.sort_by(|a, b| {
            b.span
                .start
                .cmp(&a.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });

        let mut result = source.to_string();
        let mut iter = sorted.into_iter().peekable();
        while let Some(edit) = iter.next() {
            // Later-pushed edits at the same offset were sorted directly
            // after this one; applying them first would flip their order,
            // so gather and splice same-position insertions together.
            let mut text = edit.new_text.clone();
            while let Some(next) = iter.peek() {
                if next.span == edit.span && next.is_insert() && edit.is_insert() {
                    text.push_str(&next.new_text);
                    iter.next();
                } else {
                    break;
                }
            }

            let start = (edit.span.start as usize).min(result.len());
            let end = (edit.span.end as usize).min(result.len()).max(start);
            result.replace_range(start..end, &text);
        }

        result
    }
}
