//! Expression parsing: the binary precedence chain and factors.
//!
//! Lowest to highest: logical (`&&`, `||`), comparison, additive,
//! multiplicative, factor. Every level is left-associative.

use crate::{ParseError, Parser};
use serein_diagnostic::ErrorCode;
use serein_ir::{BinaryOp, NodeId, NodeKind, TokenKind};
use serein_stack::ensure_sufficient_stack;

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        ensure_sufficient_stack(|| self.parse_logical())
    }

    fn parse_logical(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_comparison()?;
        while let Some(op) = self.match_logical_op() {
            self.advance()?;
            let right = self.parse_comparison()?;
            left = self.make_binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_comparison_op() {
            self.advance()?;
            let right = self.parse_additive()?;
            left = self.make_binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = self.make_binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_factor()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance()?;
            let right = self.parse_factor()?;
            left = self.make_binary(left, op, right);
        }
        Ok(left)
    }

    fn make_binary(&mut self, left: NodeId, op: BinaryOp, right: NodeId) -> NodeId {
        let span = self.arena.span(left).merge(self.arena.span(right));
        self.alloc(NodeKind::Binary { left, op, right }, span)
    }

    fn match_logical_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        }
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            _ => None,
        }
    }

    /// Literals, negative numeric literals, parenthesized expressions, array
    /// literals, `new` expressions and identifier-rooted postfix chains.
    fn parse_factor(&mut self) -> Result<NodeId, ParseError> {
        let token = *self.cursor.current();
        let literal = match token.kind {
            TokenKind::Null => Some(NodeKind::Null),
            TokenKind::True => Some(NodeKind::Boolean(true)),
            TokenKind::False => Some(NodeKind::Boolean(false)),
            TokenKind::Char(c) => Some(NodeKind::Char(c)),
            TokenKind::String(s) => Some(NodeKind::String(s)),
            TokenKind::RawString(s) => Some(NodeKind::RawString(s)),
            TokenKind::Int(v) => Some(NodeKind::Int(v)),
            TokenKind::Long(v) => Some(NodeKind::Long(v)),
            TokenKind::Float(bits) => Some(NodeKind::Float(bits)),
            TokenKind::Double(bits) => Some(NodeKind::Double(bits)),
            _ => None,
        };

        if let Some(kind) = literal {
            self.advance()?;
            let is_numeric = kind.is_numeric_literal();
            let node = self.alloc(kind, token.span);
            // `1.5.ToString()` is not a thing; text literals may chain.
            return if is_numeric {
                Ok(node)
            } else {
                self.parse_postfix_chain(node)
            };
        }

        match token.kind {
            TokenKind::Minus => self.parse_negative_literal(),
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                self.parse_postfix_chain(inner)
            }
            TokenKind::LBracket => {
                let array = self.parse_array_literal()?;
                self.parse_postfix_chain(array)
            }
            TokenKind::New => {
                let instance = self.parse_instantiation()?;
                self.parse_postfix_chain(instance)
            }
            TokenKind::Ident(_) => self.parse_identifier_chain(),
            other => Err(self.cursor.error(
                ErrorCode::E1002,
                format!("expected expression, found {}", other.display_name()),
                token.span,
            )),
        }
    }

    /// `-` directly followed by a numeric literal.
    fn parse_negative_literal(&mut self) -> Result<NodeId, ParseError> {
        let minus = self.advance()?;
        let token = *self.cursor.current();
        let kind = match token.kind {
            TokenKind::Int(v) => NodeKind::Int(v.wrapping_neg()),
            // `-2147483648` lexes as a long that fits back into an int.
            TokenKind::Long(v) => match i32::try_from(-v) {
                Ok(narrow) => NodeKind::Int(narrow),
                Err(_) => NodeKind::Long(-v),
            },
            TokenKind::Float(bits) => NodeKind::Float((-f32::from_bits(bits)).to_bits()),
            TokenKind::Double(bits) => NodeKind::Double((-f64::from_bits(bits)).to_bits()),
            other => {
                return Err(self.cursor.error(
                    ErrorCode::E1002,
                    format!(
                        "expected a numeric literal after `-`, found {}",
                        other.display_name()
                    ),
                    token.span,
                ))
            }
        };
        self.advance()?;
        Ok(self.alloc(kind, minus.span.merge(token.span)))
    }

    /// `[e1, e2, ...]` with an optional trailing comma.
    fn parse_array_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        while !self.check(TokenKind::RBracket) {
            elements.push(self.parse_expression()?);
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }
        self.expect(TokenKind::RBracket)?;
        let elements = self.arena.alloc_list(elements);
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::ArrayDefinition { elements }, span))
    }
}
