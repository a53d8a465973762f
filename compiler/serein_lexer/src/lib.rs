//! Lexer for Serein.Script using logos with string interning.
//!
//! The lexer is pull-based: the parser asks for one token at a time with
//! [`Lexer::next_token`], and looks ahead with [`Lexer::peek_token`] or an
//! explicit [`Lexer::snapshot`]/[`Lexer::restore`] pair. Looking ahead
//! clones the scan cursor, so nothing is consumed.
//!
//! Lexing is all-or-nothing: the first malformed literal or unrecognized
//! character is a fatal [`LexError`].

mod error;
mod literal;
mod raw;

pub use error::{LexError, LexErrorKind};

use logos::Logos;
use raw::{RawEnd, RawToken};
use serein_ir::{LineIndex, Span, StringInterner, Token, TokenKind};

/// Immutable scan context, split from the cursor so the cursor can be
/// cloned for look-ahead.
struct ScanContext<'src> {
    source: &'src str,
    interner: &'src StringInterner,
    line_index: LineIndex,
}

/// Saved cursor position.
#[derive(Clone)]
pub struct LexerSnapshot<'src> {
    cursor: logos::Lexer<'src, RawToken>,
}

/// Pull lexer over one script source.
pub struct Lexer<'src> {
    ctx: ScanContext<'src>,
    cursor: logos::Lexer<'src, RawToken>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, interner: &'src StringInterner) -> Self {
        Lexer {
            ctx: ScanContext {
                source,
                interner,
                line_index: LineIndex::new(source),
            },
            cursor: RawToken::lexer(source),
        }
    }

    /// Consume and return the next token; `Eof` once input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.ctx.scan(&mut self.cursor)
    }

    /// The token `n` positions ahead (0 is the next token), without
    /// consuming input.
    pub fn peek_token(&self, n: usize) -> Result<Token, LexError> {
        let mut probe = self.cursor.clone();
        let mut token = self.ctx.scan(&mut probe)?;
        for _ in 0..n {
            if token.is_eof() {
                break;
            }
            token = self.ctx.scan(&mut probe)?;
        }
        Ok(token)
    }

    pub fn snapshot(&self) -> LexerSnapshot<'src> {
        LexerSnapshot {
            cursor: self.cursor.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: LexerSnapshot<'src>) {
        self.cursor = snapshot.cursor;
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.ctx.source
    }

    #[inline]
    pub fn line_index(&self) -> &LineIndex {
        &self.ctx.line_index
    }

    /// Source text of a 1-based row.
    pub fn line_text(&self, row: u32) -> &'src str {
        self.ctx.line_index.line_text(self.ctx.source, row)
    }
}

impl<'src> ScanContext<'src> {
    fn scan(&self, cursor: &mut logos::Lexer<'src, RawToken>) -> Result<Token, LexError> {
        let Some(result) = cursor.next() else {
            let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
            return Ok(Token::new(
                TokenKind::Eof,
                Span::point(end),
                self.line_index.row_of(end),
            ));
        };

        let span = Span::from_range(cursor.span());
        let slice = cursor.slice();
        let kind = match result {
            Ok(raw) => self.convert(raw, slice),
            Err(()) => Err(LexErrorKind::UnexpectedCharacter(
                slice.chars().next().unwrap_or('\0'),
            )),
        };

        match kind {
            Ok(kind) => Ok(Token::new(kind, span, self.line_index.row_of(span.start))),
            Err(kind) => Err(self.error(kind, span)),
        }
    }

    #[cold]
    fn error(&self, kind: LexErrorKind, span: Span) -> LexError {
        tracing::debug!(%kind, row = self.line_index.row_of(span.start), "lex error");
        LexError::new(kind, span, self.line_index.locate(self.source, span))
    }

    /// Convert a raw token to a `TokenKind`, decoding and interning literals.
    fn convert(&self, raw: RawToken, slice: &str) -> Result<TokenKind, LexErrorKind> {
        let kind = match raw {
            RawToken::Null => TokenKind::Null,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,

            RawToken::String => {
                let text = literal::unescape_string(&slice[1..slice.len() - 1])?;
                TokenKind::String(self.interner.intern(&text))
            }
            RawToken::UnterminatedString => return Err(LexErrorKind::UnterminatedString),
            RawToken::RawString(RawEnd::Closed) => {
                TokenKind::RawString(self.interner.intern(&slice[3..slice.len() - 3]))
            }
            RawToken::RawString(RawEnd::Unterminated) => {
                return Err(LexErrorKind::UnterminatedRawString)
            }
            RawToken::Char => TokenKind::Char(literal::unescape_char(&slice[1..slice.len() - 1])?),
            RawToken::UnterminatedChar => return Err(LexErrorKind::UnterminatedChar),
            RawToken::Number => literal::classify_number(slice)?,
            RawToken::Ident => TokenKind::Ident(self.interner.intern(slice)),

            RawToken::Let => TokenKind::Let,
            RawToken::Func => TokenKind::Func,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::Return => TokenKind::Return,
            RawToken::While => TokenKind::While,
            RawToken::New => TokenKind::New,
            RawToken::Class => TokenKind::Class,
            RawToken::Using => TokenKind::Using,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Dot => TokenKind::Dot,

            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Lt => TokenKind::Lt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,

            // Comments are skipped by their callback and never produced.
            RawToken::LineComment => return Err(LexErrorKind::UnexpectedCharacter('/')),
        };
        Ok(kind)
    }
}

/// Lex a whole source into tokens, ending with `Eof`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source, interner);
    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    loop {
        let token = lexer.next_token()?;
        let eof = token.is_eof();
        tokens.push(token);
        if eof {
            return Ok(tokens);
        }
    }
}
