//! Annotation use sites.

use mallard_ir::{AnnotationUse, TokenKind};

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// Parse a run of annotation uses.
    ///
    /// Stops before `@interface`, which introduces an annotation type
    /// declaration rather than a use site.
    pub(crate) fn parse_annotations(&mut self) -> ParseResult<Vec<AnnotationUse>> {
        let mut annotations = Vec::new();
        while self.cursor.at(TokenKind::At) && self.cursor.peek_kind(1) != TokenKind::Interface {
            annotations.push(self.parse_annotation()?);
        }
        Ok(annotations)
    }

    /// Parse one annotation use: `@` qualified-name, with optional
    /// arguments consumed as a balanced run.
    pub(crate) fn parse_annotation(&mut self) -> ParseResult<AnnotationUse> {
        let at = self.cursor.expect(TokenKind::At, "`@`")?;
        let (name, name_span) = self.parse_qualified_name()?;
        let mut span = at.span.merge(name_span);
        if self.cursor.at(TokenKind::LParen) {
            let args =
                self.cursor
                    .skip_balanced(TokenKind::LParen, TokenKind::RParen, "annotation arguments")?;
            span = span.merge(args);
        }
        Ok(AnnotationUse { name, span })
    }
}
