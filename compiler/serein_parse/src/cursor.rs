//! Token cursor over the pull lexer.
//!
//! Holds the current token; everything after it stays in the lexer until
//! consumed. Look-ahead goes through lexer snapshots.

use crate::ParseError;
use serein_diagnostic::ErrorCode;
use serein_ir::{Name, Span, StringInterner, Token, TokenKind};
use serein_lexer::{Lexer, LexerSnapshot};

pub(crate) struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous_span: Span,
}

/// Saved cursor state for speculative scans.
pub(crate) struct CursorSnapshot<'a> {
    lexer: LexerSnapshot<'a>,
    current: Token,
    previous_span: Span,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, interner: &'a StringInterner) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source, interner);
        let current = lexer.next_token()?;
        Ok(Cursor {
            lexer,
            current,
            previous_span: Span::point(current.span.start),
        })
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current.span
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous_span
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current.is_eof()
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current.kind, TokenKind::Ident(_))
    }

    /// Kind of the token `n` positions after the current one.
    pub fn peek_kind(&self, n: usize) -> Result<TokenKind, ParseError> {
        Ok(self.lexer.peek_token(n)?.kind)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        let consumed = self.current;
        if !consumed.is_eof() {
            self.current = self.lexer.next_token()?;
        }
        self.previous_span = consumed.span;
        Ok(consumed)
    }

    pub fn snapshot(&self) -> CursorSnapshot<'a> {
        CursorSnapshot {
            lexer: self.lexer.snapshot(),
            current: self.current,
            previous_span: self.previous_span,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot<'a>) {
        self.lexer.restore(snapshot.lexer);
        self.current = snapshot.current;
        self.previous_span = snapshot.previous_span;
    }

    /// Expect the current token to be of the given kind, advance and return it.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: TokenKind) -> ParseError {
        self.error(
            ErrorCode::E1001,
            format!(
                "expected {}, found {}",
                kind.display_name(),
                self.current.kind.display_name()
            ),
            self.current.span,
        )
    }

    /// Expect and consume an identifier.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current.kind {
            let token = self.advance()?;
            Ok((name, token.span))
        } else {
            Err(self.make_expect_ident_error())
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_ident_error(&self) -> ParseError {
        self.error(
            ErrorCode::E1007,
            format!(
                "expected identifier, found {}",
                self.current.kind.display_name()
            ),
            self.current.span,
        )
    }

    /// Build a located parse error.
    #[cold]
    pub fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> ParseError {
        let location = self.lexer.line_index().locate(self.lexer.source(), span);
        ParseError::new(code, message, span, location)
    }
}
