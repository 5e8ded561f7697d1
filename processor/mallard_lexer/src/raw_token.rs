//! Raw logos tokens.
//!
//! Comments are lexed as tokens so that braces inside them never reach the
//! balanced-run skipper, then dropped during conversion.

use logos::{Lexer, Logos};

/// Consume a `"""` text block up to and including its closing delimiter.
///
/// Returns `false` when the block is unterminated, which surfaces as a
/// lex error at the opening delimiter.
fn lex_text_block(lex: &mut Lexer<'_, RawToken>) -> bool {
    match lex.remainder().find("\"\"\"") {
        Some(close) => {
            lex.bump(close + 3);
            true
        }
        None => false,
    }
}

/// Raw token produced by logos, before conversion to `TokenKind`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    // Covers both plain and doc block comments.
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Declaration keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("record")]
    Record,
    #[token("extends")]
    Extends,
    #[token("implements")]
    Implements,
    #[token("permits")]
    Permits,
    #[token("throws")]
    Throws,
    #[token("void")]
    Void,

    // Modifier keywords
    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("static")]
    Static,
    #[token("final")]
    Final,
    #[token("abstract")]
    Abstract,
    #[token("native")]
    Native,
    #[token("synchronized")]
    Synchronized,
    #[token("transient")]
    Transient,
    #[token("volatile")]
    Volatile,
    #[token("strictfp")]
    Strictfp,
    #[token("default")]
    Default,
    #[token("sealed")]
    Sealed,
    #[token("non-sealed")]
    NonSealed,

    // Literals
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    #[regex(r"[0-9][0-9_]*\.?[0-9_]*([eE][+-]?[0-9]+)?[fFdDlL]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    NumberLit,

    #[token("\"\"\"", lex_text_block)]
    TextBlock,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLit,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLit,

    // `true`, `false`, `null`, and every other word lex as identifiers;
    // the parser never needs to tell them apart.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // Structure
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("*")]
    Star,
    #[token("?")]
    Question,
    #[token("&")]
    Amp,
    #[token("=")]
    Eq,

    // Everything else that can appear in a skipped body.
    #[regex(r"[-+/%!^|:~]")]
    Punct,
}
