//! Postfix chains: `.member`, `.method(args)`, `name(args)`, `[index]`.
//!
//! Chains are built iteratively: each step wraps the node built so far.

use crate::{ParseError, Parser};
use serein_diagnostic::ErrorCode;
use serein_ir::{NodeId, NodeKind, NodeRange, TokenKind};

impl Parser<'_> {
    /// An identifier, or a free function call when `(` follows, then any
    /// postfix operations.
    pub(crate) fn parse_identifier_chain(&mut self) -> Result<NodeId, ParseError> {
        let (name, span) = self.cursor.expect_ident()?;
        let root = if self.check(TokenKind::LParen) {
            let args = self.parse_call_args()?;
            let span = self.span_from(span);
            self.alloc(NodeKind::FunctionCall { name, args }, span)
        } else {
            self.alloc(NodeKind::Identifier(name), span)
        };
        self.parse_postfix_chain(root)
    }

    /// Extend `node` with postfix operations until a terminator.
    pub(crate) fn parse_postfix_chain(&mut self, mut node: NodeId) -> Result<NodeId, ParseError> {
        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.advance()?;
                    let (member, _) = self.cursor.expect_ident()?;
                    if self.check(TokenKind::LParen) {
                        let args = self.parse_call_args()?;
                        let span = self.span_from(self.arena.span(node));
                        node = self.alloc(
                            NodeKind::MemberFunctionCall {
                                object: node,
                                method: member,
                                args,
                            },
                            span,
                        );
                    } else {
                        let span = self.span_from(self.arena.span(node));
                        node = self.alloc(
                            NodeKind::MemberAccess {
                                object: node,
                                member,
                            },
                            span,
                        );
                    }
                }
                TokenKind::LBracket => {
                    self.advance()?;
                    let index = self.parse_expression()?;
                    self.expect(TokenKind::RBracket)?;
                    let span = self.span_from(self.arena.span(node));
                    node = self.alloc(
                        NodeKind::CollectionIndex {
                            collection: node,
                            index,
                        },
                        span,
                    );
                }
                TokenKind::LParen => {
                    return Err(self.cursor.error(
                        ErrorCode::E1008,
                        format!(
                            "cannot call a {}; only named functions and methods are callable",
                            self.arena.kind(node).label()
                        ),
                        self.current_span(),
                    ));
                }
                kind if is_chain_terminator(kind) => return Ok(node),
                other => {
                    return Err(self.cursor.error(
                        ErrorCode::E1004,
                        format!(
                            "unresolvable postfix chain: unexpected {}",
                            other.display_name()
                        ),
                        self.current_span(),
                    ));
                }
            }
        }
    }

    /// `( expr, ... )`
    pub(crate) fn parse_call_args(&mut self) -> Result<NodeRange, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            args.push(self.parse_expression()?);
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance()?;
            if self.check(TokenKind::RParen) {
                return Err(self.cursor.error(
                    ErrorCode::E1002,
                    "expected expression, found `)`",
                    self.current_span(),
                ));
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(self.arena.alloc_list(args))
    }
}

/// Tokens that end a postfix chain.
fn is_chain_terminator(kind: TokenKind) -> bool {
    kind.is_operator()
        || matches!(
            kind,
            TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::Comma
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Eq
                | TokenKind::Eof
        )
}
