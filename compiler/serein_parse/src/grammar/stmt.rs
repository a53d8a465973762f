//! Statement parsing.

use crate::{ParseError, Parser};
use serein_diagnostic::ErrorCode;
use serein_ir::{NodeId, NodeKind, NodeRange, TokenKind};
use serein_stack::ensure_sufficient_stack;

/// How an identifier-led statement continues.
enum StatementShape {
    Assignment,
    Expression,
}

impl Parser<'_> {
    /// Parse one statement. `None` for an empty `;`.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<NodeId>, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Option<NodeId>, ParseError> {
        match self.current_kind() {
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(None)
            }
            TokenKind::Using => self.parse_using().map(Some),
            TokenKind::Class => self.parse_class().map(Some),
            TokenKind::If => self.parse_if().map(Some),
            TokenKind::While => self.parse_while().map(Some),
            TokenKind::Return => self.parse_return().map(Some),
            TokenKind::Func => Err(self.cursor.error(
                ErrorCode::E1006,
                "function declarations are not supported",
                self.current_span(),
            )),
            TokenKind::Let => {
                self.advance()?;
                if !self.cursor.check_ident() {
                    return Err(self.cursor.error(
                        ErrorCode::E1007,
                        format!(
                            "expected identifier after `let`, found {}",
                            self.current_kind().display_name()
                        ),
                        self.current_span(),
                    ));
                }
                self.parse_identifier_statement().map(Some)
            }
            TokenKind::Ident(_) => self.parse_identifier_statement().map(Some),
            _ => self.parse_expression_statement().map(Some),
        }
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<NodeRange, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.error(
                    ErrorCode::E1001,
                    "expected `}`, found end of input",
                    self.current_span(),
                ));
            }
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
        }
        self.advance()?;
        Ok(self.arena.alloc_list(statements))
    }

    /// `if (cond) { ... } [else (if ... | { ... })]`
    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance()?;
            if self.check(TokenKind::If) {
                let nested = self.parse_if()?;
                self.arena.alloc_list([nested])
            } else {
                self.parse_block()?
            }
        } else {
            NodeRange::EMPTY
        };

        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// `while (cond) { ... }`
    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::While)?.span;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::While { condition, body }, span))
    }

    /// `return [expr];`
    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::Return)?.span;
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Return { value }, span))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(expr)
    }

    /// An identifier-led statement: assignment or expression statement.
    fn parse_identifier_statement(&mut self) -> Result<NodeId, ParseError> {
        match self.scan_statement_shape()? {
            StatementShape::Expression => self.parse_expression_statement(),
            StatementShape::Assignment => self.parse_assignment(),
        }
    }

    /// Scan forward, without consuming, for a top-level `=` (assignment)
    /// or `;` (expression statement).
    fn scan_statement_shape(&mut self) -> Result<StatementShape, ParseError> {
        let start_span = self.current_span();
        let snapshot = self.cursor.snapshot();
        let mut depth: usize = 0;
        let mut scanned = 0;

        let shape = loop {
            if scanned >= self.lookahead_limit {
                self.cursor.restore(snapshot);
                return Err(self.cursor.error(
                    ErrorCode::E1005,
                    format!(
                        "statement exceeds the look-ahead limit of {} tokens",
                        self.lookahead_limit
                    ),
                    start_span,
                ));
            }
            match self.current_kind() {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        break StatementShape::Expression;
                    }
                    depth -= 1;
                }
                TokenKind::Eq if depth == 0 => break StatementShape::Assignment,
                TokenKind::Semicolon if depth == 0 => break StatementShape::Expression,
                TokenKind::Eof => break StatementShape::Expression,
                _ => {}
            }
            scanned += 1;
            if let Err(err) = self.advance() {
                self.cursor.restore(snapshot);
                return Err(err);
            }
        };

        self.cursor.restore(snapshot);
        Ok(shape)
    }

    /// `target = value;` where target is an identifier, member access or
    /// collection index.
    fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        let target = self.parse_identifier_chain()?;
        let eq_span = self.expect(TokenKind::Eq)?.span;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        let span = start.merge(self.arena.span(value));

        let kind = match *self.arena.kind(target) {
            NodeKind::Identifier(_) => NodeKind::Assignment { target, value },
            NodeKind::MemberAccess { object, member } => NodeKind::MemberAssignment {
                object,
                member,
                value,
            },
            NodeKind::CollectionIndex { .. } => NodeKind::CollectionAssignment {
                index: target,
                value,
            },
            ref other => {
                let message = if other.is_call() {
                    "invalid assignment target: a call cannot be assigned to".to_owned()
                } else {
                    format!("invalid assignment target: {}", other.label())
                };
                return Err(self.cursor.error(
                    ErrorCode::E1003,
                    message,
                    self.arena.span(target).merge(eq_span),
                ));
            }
        };
        Ok(self.alloc(kind, span))
    }
}
