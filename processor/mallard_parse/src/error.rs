//! Parse errors.
//!
//! The parser is fail-fast: the first error aborts the unit. The processor
//! treats an unparseable source as a per-match failure, so there is no
//! consumer for partial trees or recovery.

use mallard_diagnostic::{Diagnostic, ErrorCode};
use mallard_ir::Span;

/// A parse failure at a specific source location.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Convert to a diagnostic for the host channel.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, "here")
    }
}

/// Result alias used throughout the grammar.
pub type ParseResult<T> = Result<T, ParseError>;
