//! Lexer for Java source, built on logos.
//!
//! Produces a [`TokenList`] of declaration-level tokens. Comments are
//! consumed and dropped; string, char, and text-block literals become
//! single tokens, which is what makes the parser's balanced-run body
//! skipping safe (a `{` inside a literal or comment never reaches it).

mod convert;
mod lex_error;
mod raw_token;

use logos::Logos;
use mallard_ir::{Span, Token, TokenList};

use crate::convert::convert_token;
use crate::raw_token::RawToken;
pub use lex_error::LexError;

/// Output of lexing one source file.
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex a full source file.
///
/// Always returns a sealed token list ending in EOF, even when the source
/// contains unrecognised characters; those are reported in `errors`.
pub fn lex(source: &str) -> LexOutput {
    let mut output = LexOutput::default();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(raw) => {
                if let Some(kind) = convert_token(raw) {
                    output.tokens.push(Token::new(kind, span));
                }
            }
            Err(()) => output.errors.push(LexError {
                span,
                text: lexer.slice().to_string(),
            }),
        }
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    output.tokens.finish(end);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use mallard_ir::TokenKind;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let output = lex(source);
        assert!(!output.has_errors(), "lex errors: {:?}", output.errors);
        output.tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_class_header() {
        assert_eq!(
            kinds("public class C {}"),
            vec![
                TokenKind::Public,
                TokenKind::Class,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(
            kinds("class /* { */ C // }\n{}"),
            vec![
                TokenKind::Class,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_hides_braces() {
        let output = lex(r#"String s = "{ not a brace }";"#);
        let braces = output
            .tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::LBrace | TokenKind::RBrace))
            .count();
        assert_eq!(braces, 0);
    }

    #[test]
    fn text_block_is_one_token() {
        let src = "String s = \"\"\"\n  { \"inner\" }\n  \"\"\";";
        let output = lex(src);
        assert!(!output.has_errors());
        assert_eq!(
            output
                .tokens
                .iter()
                .filter(|t| t.kind == TokenKind::TextBlock)
                .count(),
            1
        );
    }

    #[test]
    fn unterminated_text_block_is_an_error() {
        let output = lex("String s = \"\"\"never closed");
        assert!(output.has_errors());
    }

    #[test]
    fn shift_lexes_as_two_angle_brackets() {
        assert_eq!(
            kinds("List<List<String>> x"),
            vec![
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn ellipsis_is_one_token() {
        assert_eq!(
            kinds("f(String... args)"),
            vec![
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::Ellipsis,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn contextual_words_are_identifiers() {
        // `true`, `false`, and `null` carry no declaration structure.
        assert_eq!(
            kinds("true false null"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn stray_character_reports_error_and_continues() {
        let output = lex("class # C");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].text, "#");
        let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Class, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn spans_point_at_source() {
        let src = "package a.b;";
        let output = lex(src);
        let texts: Vec<_> = output
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.text(src))
            .collect();
        assert_eq!(texts, vec!["package", "a", ".", "b", ";"]);
    }
}
