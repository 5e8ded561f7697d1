//! Raw token conversion.
//!
//! Maps logos raw tokens to the final `TokenKind`. Comments convert to
//! `None` and are dropped from the stream.

use mallard_ir::TokenKind;

use crate::raw_token::RawToken;

pub(crate) fn convert_token(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment => return None,

        RawToken::Package => TokenKind::Package,
        RawToken::Import => TokenKind::Import,
        RawToken::Class => TokenKind::Class,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Enum => TokenKind::Enum,
        RawToken::Record => TokenKind::Record,
        RawToken::Extends => TokenKind::Extends,
        RawToken::Implements => TokenKind::Implements,
        RawToken::Permits => TokenKind::Permits,
        RawToken::Throws => TokenKind::Throws,
        RawToken::Void => TokenKind::Void,

        RawToken::Public => TokenKind::Public,
        RawToken::Private => TokenKind::Private,
        RawToken::Protected => TokenKind::Protected,
        RawToken::Static => TokenKind::Static,
        RawToken::Final => TokenKind::Final,
        RawToken::Abstract => TokenKind::Abstract,
        RawToken::Native => TokenKind::Native,
        RawToken::Synchronized => TokenKind::Synchronized,
        RawToken::Transient => TokenKind::Transient,
        RawToken::Volatile => TokenKind::Volatile,
        RawToken::Strictfp => TokenKind::Strictfp,
        RawToken::Default => TokenKind::Default,
        RawToken::Sealed => TokenKind::Sealed,
        RawToken::NonSealed => TokenKind::NonSealed,

        RawToken::NumberLit => TokenKind::NumberLit,
        RawToken::TextBlock => TokenKind::TextBlock,
        RawToken::StringLit => TokenKind::StringLit,
        RawToken::CharLit => TokenKind::CharLit,
        RawToken::Ident => TokenKind::Ident,

        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Dot => TokenKind::Dot,
        RawToken::At => TokenKind::At,
        RawToken::Star => TokenKind::Star,
        RawToken::Question => TokenKind::Question,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Punct => TokenKind::Punct,
    };
    Some(kind)
}
