//! Type references.
//!
//! A type reference is kept as its raw source slice plus a span. The
//! signature layer canonicalises the spelling later; the parser only has
//! to find where the type ends.

use mallard_diagnostic::ErrorCode;
use mallard_ir::{Span, TokenKind, TypeRef};

use crate::error::{ParseError, ParseResult};
use crate::Parser;

impl Parser<'_> {
    /// Parse a dotted name, returning the text and covered span.
    pub(crate) fn parse_qualified_name(&mut self) -> ParseResult<(String, Span)> {
        let first = self.cursor.expect(TokenKind::Ident, "an identifier")?;
        let mut span = first.span;
        // Qualified names never contain whitespace in canonical form, so
        // the text is rebuilt from segments rather than sliced.
        let mut name = first.span.text(self.cursor.source()).to_string();
        while self.cursor.at(TokenKind::Dot) && self.cursor.peek_kind(1) == TokenKind::Ident {
            self.cursor.advance();
            let segment = self.cursor.expect(TokenKind::Ident, "an identifier")?;
            name.push('.');
            name.push_str(segment.span.text(self.cursor.source()));
            span = span.merge(segment.span);
        }
        Ok((name, span))
    }

    /// Parse a type reference: qualified name or `void`, optional type
    /// arguments, optional array dimensions. Leading type annotations
    /// (`@Nullable String`) are consumed but excluded from the text.
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeRef> {
        while self.cursor.at(TokenKind::At) {
            self.parse_annotation()?;
        }

        let start = match self.cursor.current_kind() {
            TokenKind::Void => self.cursor.advance().span,
            TokenKind::Ident => {
                let (_, span) = self.parse_qualified_name()?;
                span
            }
            _ => {
                return Err(ParseError::new(
                    ErrorCode::E1003,
                    format!("expected a type, found `{}`", self.cursor.current_text()),
                    self.cursor.current_span(),
                ))
            }
        };
        let mut span = start;

        if self.cursor.at(TokenKind::Lt) {
            span = span.merge(self.skip_type_arguments()?);
        }
        span = span.merge(self.skip_array_dims(span));

        Ok(TypeRef::new(span.text(self.cursor.source()), span))
    }

    /// Consume `<...>` type arguments, counting angle depth. Returns the
    /// covered span. Shift operators never occur here because argument
    /// positions only contain type syntax.
    pub(crate) fn skip_type_arguments(&mut self) -> ParseResult<Span> {
        let open = self.cursor.expect(TokenKind::Lt, "`<`")?.span;
        let mut depth = 1usize;
        let mut span = open;
        loop {
            if self.cursor.at_eof() {
                return Err(ParseError::new(
                    ErrorCode::E1004,
                    "unclosed type argument list",
                    open,
                ));
            }
            let token = self.cursor.advance();
            span = span.merge(token.span);
            match token.kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(span);
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume any `[]` array dimensions after `base`, returning the span
    /// extended over them. Only valid when the dimensions directly follow
    /// the base type in source.
    pub(crate) fn skip_array_dims(&mut self, base: Span) -> Span {
        let mut span = base;
        while self.cursor.at(TokenKind::LBracket)
            && self.cursor.peek_kind(1) == TokenKind::RBracket
        {
            self.cursor.advance();
            span = span.merge(self.cursor.advance().span);
        }
        span
    }

    /// Consume detached `[]` dimensions (after a declarator name or a
    /// method's parameter list) and return how many were eaten.
    pub(crate) fn eat_array_dims(&mut self) -> usize {
        let mut dims = 0;
        while self.cursor.at(TokenKind::LBracket)
            && self.cursor.peek_kind(1) == TokenKind::RBracket
        {
            self.cursor.advance();
            self.cursor.advance();
            dims += 1;
        }
        dims
    }

    /// Parse a comma-separated list of type references (extends,
    /// implements, permits, throws clauses).
    pub(crate) fn parse_type_list(&mut self) -> ParseResult<Vec<TypeRef>> {
        let mut types = vec![self.parse_type()?];
        while self.cursor.eat(TokenKind::Comma).is_some() {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }
}
