//! The compilation unit: package declaration, imports, type list.

use mallard_ir::{CompilationUnit, ImportDecl, PackageDecl, Span, TokenKind};

use crate::error::ParseResult;
use crate::Parser;

impl Parser<'_> {
    /// Parse a whole source file.
    pub(crate) fn parse_unit(&mut self) -> ParseResult<CompilationUnit> {
        let mut unit = CompilationUnit::default();

        // Package-level annotations (package-info.java) are legal; they
        // are consumed and dropped.
        if self.cursor.at(TokenKind::At) && self.cursor.peek_kind(1) != TokenKind::Interface {
            let checkpoint_is_package = {
                // Annotations here belong to the package declaration only
                // when one follows; otherwise they open a type declaration.
                let mut probe = 0usize;
                loop {
                    match self.lookahead_past_annotation(probe) {
                        Some(next) => probe = next,
                        None => break,
                    }
                }
                self.cursor.peek_kind(probe) == TokenKind::Package
            };
            if checkpoint_is_package {
                self.parse_annotations()?;
            }
        }

        if self.cursor.at(TokenKind::Package) {
            unit.package = Some(self.parse_package()?);
        }

        while self.cursor.at(TokenKind::Import) {
            unit.imports.push(self.parse_import()?);
        }

        while !self.cursor.at_eof() {
            if self.cursor.eat(TokenKind::Semicolon).is_some() {
                continue;
            }
            unit.types.push(self.parse_type_decl()?);
        }

        Ok(unit)
    }

    /// `package a.b.c;`
    fn parse_package(&mut self) -> ParseResult<PackageDecl> {
        let kw = self.cursor.expect(TokenKind::Package, "`package`")?;
        let (name, _) = self.parse_qualified_name()?;
        let semi = self.cursor.expect(TokenKind::Semicolon, "`;`")?;
        Ok(PackageDecl {
            name,
            span: Span::new(kw.span.start, semi.span.end),
        })
    }

    /// `import a.b.C;`, `import a.b.*;`, `import static a.b.C.f;`
    fn parse_import(&mut self) -> ParseResult<ImportDecl> {
        let kw = self.cursor.expect(TokenKind::Import, "`import`")?;
        let is_static = self.cursor.eat(TokenKind::Static).is_some();
        let (path, _) = self.parse_qualified_name()?;
        let on_demand = if self.cursor.at(TokenKind::Dot)
            && self.cursor.peek_kind(1) == TokenKind::Star
        {
            self.cursor.advance();
            self.cursor.advance();
            true
        } else {
            false
        };
        let semi = self.cursor.expect(TokenKind::Semicolon, "`;`")?;
        Ok(ImportDecl {
            path,
            is_static,
            on_demand,
            span: Span::new(kw.span.start, semi.span.end),
        })
    }

    /// If token `at` starts an annotation use, return the index just past
    /// it (name and optional argument list included); `None` otherwise.
    fn lookahead_past_annotation(&self, at: usize) -> Option<usize> {
        if self.cursor.peek_kind(at) != TokenKind::At
            || self.cursor.peek_kind(at + 1) != TokenKind::Ident
        {
            return None;
        }
        let mut idx = at + 2;
        while self.cursor.peek_kind(idx) == TokenKind::Dot
            && self.cursor.peek_kind(idx + 1) == TokenKind::Ident
        {
            idx += 2;
        }
        if self.cursor.peek_kind(idx) == TokenKind::LParen {
            let mut depth = 0usize;
            loop {
                match self.cursor.peek_kind(idx) {
                    TokenKind::LParen => depth += 1,
                    TokenKind::RParen => {
                        depth -= 1;
                        if depth == 0 {
                            idx += 1;
                            break;
                        }
                    }
                    TokenKind::Eof => return None,
                    _ => {}
                }
                idx += 1;
            }
        }
        Some(idx)
    }
}
