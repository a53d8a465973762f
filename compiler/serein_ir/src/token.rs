//! Tokens produced by the lexer.

use super::{Name, Span};
use std::fmt;

/// A lexed token.
///
/// The row is resolved when the token is produced; the line text is
/// recovered from the source through the row when a diagnostic needs it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based source row.
    pub row: u32,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, row: u32) -> Self {
        Token { kind, span, row }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Token kinds.
///
/// Float literals are stored as bits for `Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Null,
    True,
    False,
    Char(char),
    String(Name),
    RawString(Name),
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),

    Ident(Name),

    // Keywords
    Let,
    Func,
    If,
    Else,
    Return,
    While,
    New,
    Class,
    Using,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Dot,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Gt,
    Lt,
    GtEq,
    LtEq,
    EqEq,
    NotEq,
    Eq,
    AmpAmp,
    PipePipe,

    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Null => "`null`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Char(_) => "char literal",
            TokenKind::String(_) => "string literal",
            TokenKind::RawString(_) => "raw string literal",
            TokenKind::Int(_) | TokenKind::Long(_) => "integer literal",
            TokenKind::Float(_) | TokenKind::Double(_) => "floating-point literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Let => "`let`",
            TokenKind::Func => "`func`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Return => "`return`",
            TokenKind::While => "`while`",
            TokenKind::New => "`new`",
            TokenKind::Class => "`class`",
            TokenKind::Using => "`using`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Gt => "`>`",
            TokenKind::Lt => "`<`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Eq => "`=`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Eof => "end of input",
        }
    }

    /// Binary operator tokens.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Gt
                | TokenKind::Lt
                | TokenKind::GtEq
                | TokenKind::LtEq
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
        )
    }

    /// Numeric literal tokens.
    pub fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int(_) | TokenKind::Long(_) | TokenKind::Float(_) | TokenKind::Double(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
