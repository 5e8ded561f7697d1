//! Declaration-level recursive descent parser for Java source.
//!
//! Produces a [`CompilationUnit`] with spans on every rewrite anchor.
//! Method bodies and initializers are consumed as balanced token runs; the
//! processor never needs to see inside them.
//!
//! The parser is fail-fast: an unparseable unit aborts with the first
//! error, because the processor's contract treats a parse failure as a
//! per-match failure rather than something to recover from.

mod cursor;
mod error;
mod grammar;


use mallard_diagnostic::ErrorCode;
use mallard_ir::{CompilationUnit, TokenList};

pub use cursor::Cursor;
pub use error::{ParseError, ParseResult};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a lexed token stream.
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
        }
    }

    /// Parse the whole unit, consuming the parser.
    pub fn parse(mut self) -> ParseResult<CompilationUnit> {
        self.parse_unit()
    }
}

/// Lex and parse a source file in one step.
///
/// Lex errors are promoted to the parse error channel; the first
/// unrecognised character aborts the unit just like a grammar error.
pub fn parse_source(source: &str) -> ParseResult<CompilationUnit> {
    let lexed = mallard_lexer::lex(source);
    if let Some(first) = lexed.errors.first() {
        return Err(ParseError::new(
            ErrorCode::E0001,
            first.to_string(),
            first.span,
        ));
    }
    tracing::trace!(tokens = lexed.tokens.len(), "lexed compilation unit");
    Parser::new(&lexed.tokens, source).parse()
}
