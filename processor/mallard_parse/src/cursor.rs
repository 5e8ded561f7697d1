//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use mallard_diagnostic::ErrorCode;
use mallard_ir::{Span, Token, TokenKind, TokenList};

use crate::error::{ParseError, ParseResult};

/// Cursor for navigating tokens.
///
/// Invariant: the position is always valid; the last token is EOF and the
/// cursor never advances past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    ///
    /// # Panics
    /// Panics if the token list is empty (it must at least contain EOF).
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        assert!(!tokens.is_empty(), "token list must end in EOF");
        Cursor {
            tokens,
            source,
            pos: 0,
        }
    }

    /// The source text being parsed.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the current token's source text.
    #[inline]
    pub fn current_text(&self) -> &'a str {
        self.current().span.text(self.source)
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Look ahead `n` tokens without consuming. `peek_kind(0)` is the
    /// current token. Clamped at EOF.
    #[inline]
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[idx].kind
    }

    /// Check if the current token matches a kind.
    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Check if the cursor has reached the end of input.
    #[inline]
    pub fn at_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Advance to the next token, returning the one just consumed.
    /// Stays put at EOF.
    pub fn advance(&mut self) -> Token {
        let token = *self.current();
        if !self.at_eof() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume the current token or fail with a parse error.
    pub fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Build an "unexpected token" error describing what was expected.
    pub fn unexpected(&self, what: &str) -> ParseError {
        let found = if self.at_eof() {
            "end of file".to_string()
        } else {
            format!("`{}`", self.current_text())
        };
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {what}, found {found}"),
            self.current_span(),
        )
    }

    /// Skip a balanced run of `open`/`close` delimiters, starting at the
    /// current `open` token. Returns the covered span. Literals and
    /// comments are single tokens by the time they reach the parser, so
    /// counting delimiters is safe here.
    pub fn skip_balanced(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        what: &str,
    ) -> ParseResult<Span> {
        let start = self.expect(open, what)?.span;
        let mut depth = 1usize;
        loop {
            if self.at_eof() {
                return Err(ParseError::new(
                    ErrorCode::E1004,
                    format!("unclosed {what}"),
                    start,
                ));
            }
            let token = self.advance();
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(start.merge(token.span));
                }
            }
        }
    }
}
