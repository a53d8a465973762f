//! Recursive-descent parser for Serein.Script.
//!
//! Produces a `Program`: a flat `NodeArena` plus the top-level statement
//! list. Parsing is all-or-nothing; the first unexpected token is a fatal
//! `ParseError` carrying the offending token's row and line text.

mod cursor;
mod error;
mod grammar;

pub use error::ParseError;

use cursor::Cursor;
use serein_ir::{NodeArena, NodeId, NodeKind, Program, SharedInterner, Span, TokenKind};
use std::sync::Arc;

/// Default cap on the assignment-vs-expression look-ahead scan.
pub const DEFAULT_LOOKAHEAD_LIMIT: usize = 1024;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: NodeArena,
    source: &'a str,
    interner: &'a SharedInterner,
    lookahead_limit: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser; fails if the very first token does not lex.
    pub fn new(source: &'a str, interner: &'a SharedInterner) -> Result<Self, ParseError> {
        Ok(Parser {
            cursor: Cursor::new(source, interner)?,
            arena: NodeArena::with_capacity(source.len()),
            source,
            interner,
            lookahead_limit: DEFAULT_LOOKAHEAD_LIMIT,
        })
    }

    /// Cap the number of tokens scanned when disambiguating an
    /// identifier-led statement.
    #[must_use]
    pub fn with_lookahead_limit(mut self, limit: usize) -> Self {
        self.lookahead_limit = limit.max(1);
        self
    }

    /// Parse the whole source.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.source.len()))]
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
        }
        let range = self.arena.alloc_list(statements);
        tracing::debug!(nodes = self.arena.len(), statements = range.len(), "parsed program");
        Ok(Program::new(
            self.arena,
            range,
            Arc::from(self.source),
            self.interner.clone(),
        ))
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Result<serein_ir::Token, ParseError> {
        self.cursor.advance()
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<serein_ir::Token, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.arena.alloc(kind, span)
    }

    /// Span from `start` through the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }
}

/// Parse a script source into a `Program`.
pub fn parse(source: &str, interner: &SharedInterner) -> Result<Program, ParseError> {
    Parser::new(source, interner)?.parse_program()
}

#[cfg(test)]
mod tests;
