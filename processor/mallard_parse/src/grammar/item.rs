//! Type declarations and their members.

use mallard_diagnostic::ErrorCode;
use mallard_ir::{
    FieldDecl, Member, MethodDecl, Modifiers, Param, Span, TokenKind, TypeDecl, TypeKind, TypeRef,
};
use smallvec::SmallVec;

use crate::error::{ParseError, ParseResult};
use crate::Parser;

impl Parser<'_> {
    /// Consume a run of modifier keywords.
    pub(crate) fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        loop {
            let flag = match self.cursor.current_kind() {
                TokenKind::Public => Modifiers::PUBLIC,
                TokenKind::Private => Modifiers::PRIVATE,
                TokenKind::Protected => Modifiers::PROTECTED,
                TokenKind::Static => Modifiers::STATIC,
                TokenKind::Final => Modifiers::FINAL,
                TokenKind::Abstract => Modifiers::ABSTRACT,
                TokenKind::Native => Modifiers::NATIVE,
                TokenKind::Synchronized => Modifiers::SYNCHRONIZED,
                TokenKind::Transient => Modifiers::TRANSIENT,
                TokenKind::Volatile => Modifiers::VOLATILE,
                TokenKind::Strictfp => Modifiers::STRICTFP,
                TokenKind::Default => Modifiers::DEFAULT,
                TokenKind::Sealed => Modifiers::SEALED,
                TokenKind::NonSealed => Modifiers::NON_SEALED,
                _ => break,
            };
            self.cursor.advance();
            modifiers |= flag;
        }
        modifiers
    }

    /// Parse a type declaration, annotations and modifiers included.
    pub(crate) fn parse_type_decl(&mut self) -> ParseResult<TypeDecl> {
        let decl_start = self.cursor.current_span().start;
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers();

        let kind = match self.cursor.current_kind() {
            TokenKind::Class => {
                self.cursor.advance();
                TypeKind::Class
            }
            TokenKind::Interface => {
                self.cursor.advance();
                TypeKind::Interface
            }
            TokenKind::Enum => {
                self.cursor.advance();
                TypeKind::Enum
            }
            TokenKind::Record => {
                self.cursor.advance();
                TypeKind::Record
            }
            TokenKind::At if self.cursor.peek_kind(1) == TokenKind::Interface => {
                self.cursor.advance();
                self.cursor.advance();
                TypeKind::Annotation
            }
            _ => {
                return Err(ParseError::new(
                    ErrorCode::E1005,
                    format!(
                        "expected a type declaration, found `{}`",
                        self.cursor.current_text()
                    ),
                    self.cursor.current_span(),
                ))
            }
        };

        let name_token = self.cursor.expect(TokenKind::Ident, "a type name")?;
        let name = name_token.span.text(self.cursor.source()).to_string();
        let name_span = name_token.span;
        let mut header_anchor = name_span.end;

        let type_params = if self.cursor.at(TokenKind::Lt) {
            let span = self.skip_type_arguments()?;
            header_anchor = span.end;
            Some(span)
        } else {
            None
        };

        // Record components.
        if kind == TypeKind::Record && self.cursor.at(TokenKind::LParen) {
            let components = self.cursor.skip_balanced(
                TokenKind::LParen,
                TokenKind::RParen,
                "record components",
            )?;
            header_anchor = components.end;
        }

        let extends = if self.cursor.eat(TokenKind::Extends).is_some() {
            let types = self.parse_type_list()?;
            if let Some(last) = types.last() {
                header_anchor = last.span.end;
            }
            types
        } else {
            Vec::new()
        };

        let implements = if self.cursor.eat(TokenKind::Implements).is_some() {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        if self.cursor.eat(TokenKind::Permits).is_some() {
            self.parse_type_list()?;
        }

        let body_open = self.cursor.expect(TokenKind::LBrace, "`{`")?.span;

        if kind == TypeKind::Enum {
            self.skip_enum_constants()?;
        }

        let mut members = Vec::new();
        while !self.cursor.at(TokenKind::RBrace) {
            if self.cursor.at_eof() {
                return Err(ParseError::new(
                    ErrorCode::E1004,
                    format!("unclosed body of `{name}`"),
                    body_open,
                ));
            }
            if self.cursor.eat(TokenKind::Semicolon).is_some() {
                continue;
            }
            members.push(self.parse_member(&name)?);
        }
        let close = self.cursor.advance();

        Ok(TypeDecl {
            kind,
            annotations,
            modifiers,
            name,
            name_span,
            type_params,
            extends,
            implements,
            header_anchor,
            body_open,
            members,
            span: Span::new(decl_start, close.span.end),
        })
    }

    /// Skip the constant list at the head of an enum body: everything up
    /// to the `;` separating constants from members, or the closing brace
    /// of a constants-only enum. Constant class bodies nest braces.
    fn skip_enum_constants(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ErrorCode::E1004,
                        "unclosed enum body",
                        self.cursor.current_span(),
                    ))
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.cursor.advance();
                    return Ok(());
                }
                TokenKind::RBrace if depth == 0 => return Ok(()),
                TokenKind::LBrace | TokenKind::LParen => {
                    depth += 1;
                    self.cursor.advance();
                }
                TokenKind::RBrace | TokenKind::RParen => {
                    depth = depth.saturating_sub(1);
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Parse one member of a type body.
    fn parse_member(&mut self, enclosing: &str) -> ParseResult<Member> {
        let decl_start = self.cursor.current_span().start;
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers();

        // Nested type declaration.
        if matches!(
            self.cursor.current_kind(),
            TokenKind::Class | TokenKind::Interface | TokenKind::Enum | TokenKind::Record
        ) || (self.cursor.at(TokenKind::At)
            && self.cursor.peek_kind(1) == TokenKind::Interface)
        {
            // The annotations and modifiers already consumed belong to the
            // nested declaration.
            let nested = self.parse_type_decl_with(annotations, modifiers, decl_start)?;
            return Ok(Member::Type(nested));
        }

        // Initializer block (static or instance).
        if self.cursor.at(TokenKind::LBrace) {
            let span =
                self.cursor
                    .skip_balanced(TokenKind::LBrace, TokenKind::RBrace, "initializer block")?;
            return Ok(Member::Init(Span::new(decl_start, span.end)));
        }

        let type_params = if self.cursor.at(TokenKind::Lt) {
            Some(self.skip_type_arguments()?)
        } else {
            None
        };

        // Constructor: the enclosing type's name directly followed by `(`.
        if self.cursor.at(TokenKind::Ident)
            && self.cursor.current_text() == enclosing
            && self.cursor.peek_kind(1) == TokenKind::LParen
        {
            let name_token = self.cursor.advance();
            let method = self.parse_method_rest(
                annotations,
                modifiers,
                type_params,
                None,
                name_token.span,
                decl_start,
            )?;
            return Ok(Member::Constructor(method));
        }

        let ty = self.parse_type()?;
        let name_token = self.cursor.expect(TokenKind::Ident, "a member name")?;

        if self.cursor.at(TokenKind::LParen) {
            let method = self.parse_method_rest(
                annotations,
                modifiers,
                type_params,
                Some(ty),
                name_token.span,
                decl_start,
            )?;
            return Ok(Member::Method(method));
        }

        self.parse_field_rest(annotations, modifiers, ty, name_token.span, decl_start)
            .map(Member::Field)
    }

    /// Re-enter type declaration parsing with already-consumed prefix.
    fn parse_type_decl_with(
        &mut self,
        annotations: Vec<mallard_ir::AnnotationUse>,
        modifiers: Modifiers,
        decl_start: u32,
    ) -> ParseResult<TypeDecl> {
        let mut decl = self.parse_type_decl()?;
        decl.annotations = annotations;
        decl.modifiers = modifiers;
        decl.span = Span::new(decl_start, decl.span.end);
        Ok(decl)
    }

    /// Parse a method or constructor from its parameter list onward.
    fn parse_method_rest(
        &mut self,
        annotations: Vec<mallard_ir::AnnotationUse>,
        modifiers: Modifiers,
        type_params: Option<Span>,
        return_type: Option<TypeRef>,
        name_span: Span,
        decl_start: u32,
    ) -> ParseResult<MethodDecl> {
        let name = name_span.text(self.cursor.source()).to_string();
        let params = self.parse_params()?;

        // Archaic array-returning form: `int f()[]`.
        let mut return_type = return_type;
        if let Some(mut ty) = return_type.take() {
            for _ in 0..self.eat_array_dims() {
                ty.text.push_str("[]");
            }
            return_type = Some(ty);
        }

        let throws = if self.cursor.eat(TokenKind::Throws).is_some() {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        // Annotation type members may carry a default value clause.
        if self.cursor.eat(TokenKind::Default).is_some() {
            self.skip_initializer()?;
        }

        let (body, end) = match self.cursor.current_kind() {
            TokenKind::LBrace => {
                let span =
                    self.cursor
                        .skip_balanced(TokenKind::LBrace, TokenKind::RBrace, "method body")?;
                (Some(span), span.end)
            }
            TokenKind::Semicolon => {
                let semi = self.cursor.advance();
                (None, semi.span.end)
            }
            _ => return Err(self.cursor.unexpected("`{` or `;`")),
        };

        Ok(MethodDecl {
            annotations,
            modifiers,
            type_params,
            return_type,
            name,
            name_span,
            params,
            throws,
            body,
            decl_start,
            span: Span::new(decl_start, end),
        })
    }

    /// Parse a parameter list, the opening `(` still pending.
    fn parse_params(&mut self) -> ParseResult<SmallVec<[Param; 4]>> {
        self.cursor.expect(TokenKind::LParen, "`(`")?;
        let mut params = SmallVec::new();

        if self.cursor.eat(TokenKind::RParen).is_some() {
            return Ok(params);
        }

        loop {
            while self.cursor.at(TokenKind::At) {
                self.parse_annotation()?;
            }
            self.parse_modifiers();

            let mut ty = self.parse_type()?;
            let varargs = self.cursor.eat(TokenKind::Ellipsis).is_some();
            let name_token = self.cursor.expect(TokenKind::Ident, "a parameter name")?;
            let name = name_token.span.text(self.cursor.source()).to_string();

            // C-style trailing dimensions attach to the type.
            for _ in 0..self.eat_array_dims() {
                ty.text.push_str("[]");
            }

            params.push(Param { ty, name, varargs });

            if self.cursor.eat(TokenKind::Comma).is_some() {
                continue;
            }
            self.cursor.expect(TokenKind::RParen, "`)` or `,`")?;
            return Ok(params);
        }
    }

    /// Parse a field declaration from its first declared name onward.
    fn parse_field_rest(
        &mut self,
        annotations: Vec<mallard_ir::AnnotationUse>,
        modifiers: Modifiers,
        ty: TypeRef,
        first_name: Span,
        decl_start: u32,
    ) -> ParseResult<FieldDecl> {
        let mut names = vec![first_name.text(self.cursor.source()).to_string()];

        loop {
            // Array dims and initializer of the current declarator.
            self.eat_array_dims();
            if self.cursor.eat(TokenKind::Eq).is_some() {
                self.skip_initializer()?;
            }
            match self.cursor.current_kind() {
                TokenKind::Comma => {
                    self.cursor.advance();
                    let name = self.cursor.expect(TokenKind::Ident, "a field name")?;
                    names.push(name.span.text(self.cursor.source()).to_string());
                }
                TokenKind::Semicolon => {
                    let semi = self.cursor.advance();
                    return Ok(FieldDecl {
                        annotations,
                        modifiers,
                        ty,
                        names,
                        span: Span::new(decl_start, semi.span.end),
                    });
                }
                _ => return Err(self.cursor.unexpected("`,`, `;`, or `=`")),
            }
        }
    }

    /// Consume a field initializer up to the `,` or `;` that ends the
    /// declarator, balancing all delimiter kinds (array initializers
    /// contain braces, calls contain parens and commas).
    ///
    /// A top-level comma only ends the declarator when what follows looks
    /// like another declarator (`, name =`, `, name;`, `, name,`). Commas
    /// inside unbracketed generic arguments (`new HashMap<String, Integer>()`)
    /// fail that test and stay part of the initializer.
    fn skip_initializer(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ErrorCode::E1004,
                        "unterminated field initializer",
                        self.cursor.current_span(),
                    ))
                }
                TokenKind::Semicolon if depth == 0 => return Ok(()),
                TokenKind::Comma if depth == 0 && self.comma_starts_declarator() => return Ok(()),
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    depth += 1;
                    self.cursor.advance();
                }
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1);
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Check whether a top-level comma introduces another field
    /// declarator rather than continuing an expression.
    fn comma_starts_declarator(&self) -> bool {
        self.cursor.peek_kind(1) == TokenKind::Ident
            && matches!(
                self.cursor.peek_kind(2),
                TokenKind::Eq | TokenKind::Comma | TokenKind::Semicolon | TokenKind::LBracket
            )
    }
}
