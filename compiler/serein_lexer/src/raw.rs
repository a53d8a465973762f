//! Raw tokens recognized by logos, before literal decoding and interning.

use logos::{Lexer, Logos, Skip};

/// How a `"""` raw string ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawEnd {
    Closed,
    Unterminated,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[token("//", skip_line_comment)]
    LineComment,

    // Keywords and keyword literals
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("let")]
    Let,
    #[token("func")]
    Func,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("while")]
    While,
    #[token("new")]
    New,
    #[token("class")]
    Class,
    #[token("using")]
    Using,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("=")]
    Eq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // Raw string: everything up to the next `"""`, newlines included
    #[token("\"\"\"", lex_raw_string)]
    RawString(RawEnd),

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedString,

    // Char literal; length is validated when decoding
    #[regex(r"'([^'\\\n\r]|\\.)*'")]
    Char,
    #[regex(r"'([^'\\\n\r]|\\.)*")]
    UnterminatedChar,

    // Number: digits, optional fraction, optional single-letter suffix
    #[regex(r"[0-9]+(\.[0-9]+)?[fFdDlL]?")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip to the end of the line.
fn skip_line_comment(lex: &mut Lexer<RawToken>) -> Skip {
    let rest = lex.remainder();
    let len = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
    lex.bump(len);
    Skip
}

/// Consume a raw string body and its closing `"""`.
fn lex_raw_string(lex: &mut Lexer<RawToken>) -> RawEnd {
    let rest = lex.remainder();
    match memchr::memmem::find(rest.as_bytes(), b"\"\"\"") {
        Some(pos) => {
            lex.bump(pos + 3);
            RawEnd::Closed
        }
        None => {
            lex.bump(rest.len());
            RawEnd::Unterminated
        }
    }
}
