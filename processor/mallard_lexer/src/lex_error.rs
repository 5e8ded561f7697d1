//! Lexer errors.

use mallard_ir::Span;

/// A span of source the lexer could not tokenize.
///
/// The lexer never aborts; it records the bad span and resumes at the next
/// character, so one stray byte does not hide the rest of the file.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LexError {
    pub span: Span,
    /// The offending text, for diagnostics.
    pub text: String,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognised character sequence `{}`", self.text)
    }
}

impl std::error::Error for LexError {}
