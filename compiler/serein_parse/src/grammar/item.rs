//! `using`, `class`, type names and `new` expressions.

use crate::{ParseError, Parser};
use serein_diagnostic::ErrorCode;
use serein_ir::{ClassField, NodeId, NodeKind, NodeRange, TokenKind};

impl Parser<'_> {
    /// `a.b.c` as written.
    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let (first, _) = self.cursor.expect_ident()?;
        let mut name = self.interner.lookup(first).to_owned();
        while self.check(TokenKind::Dot) {
            self.advance()?;
            let (part, _) = self.cursor.expect_ident()?;
            name.push('.');
            name.push_str(self.interner.lookup(part));
        }
        Ok(name)
    }

    /// A type name: dotted, with any number of `[]` suffixes.
    pub(crate) fn parse_type_name(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        let mut name = self.parse_dotted_name()?;
        while self.check(TokenKind::LBracket) && self.cursor.peek_kind(0)? == TokenKind::RBracket {
            self.advance()?;
            self.advance()?;
            name.push_str("[]");
        }
        let name = self.interner.intern(&name);
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::TypeNode { name }, span))
    }

    /// `using a.b.c;`
    pub(crate) fn parse_using(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::Using)?.span;
        let namespace = self.parse_dotted_name()?;
        self.expect(TokenKind::Semicolon)?;
        let namespace = self.interner.intern(&namespace);
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Using { namespace }, span))
    }

    /// `class Name { Type field; ... }`
    pub(crate) fn parse_class(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::Class)?.span;
        let (name, _) = self.cursor.expect_ident()?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let field_start = self.current_span();
            let ty = self.parse_type_name()?;
            let (field, _) = self.cursor.expect_ident()?;
            self.expect(TokenKind::Semicolon)?;
            if fields.iter().any(|f: &ClassField| f.name == field) {
                return Err(self.cursor.error(
                    ErrorCode::E1001,
                    format!(
                        "field `{}` is declared more than once",
                        self.interner.lookup(field)
                    ),
                    self.span_from(field_start),
                ));
            }
            fields.push(ClassField {
                name: field,
                ty,
                span: self.span_from(field_start),
            });
        }
        self.advance()?;

        let fields = self.arena.alloc_fields(fields);
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::ClassTypeDefinition { name, fields }, span))
    }

    /// `new Type(args) { Member = value, ... }`
    ///
    /// The argument list may be omitted when an initializer block follows.
    pub(crate) fn parse_instantiation(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(TokenKind::New)?.span;
        let ty = self.parse_type_name()?;

        let has_args = self.check(TokenKind::LParen);
        let args = if has_args {
            self.parse_call_args()?
        } else {
            NodeRange::EMPTY
        };

        let initializers = if self.check(TokenKind::LBrace) {
            self.parse_initializers(ty)?
        } else if has_args {
            NodeRange::EMPTY
        } else {
            return Err(self.cursor.error(
                ErrorCode::E1001,
                format!(
                    "expected `(` or `{{` after type name, found {}",
                    self.current_kind().display_name()
                ),
                self.current_span(),
            ));
        };

        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::ObjectInstantiation {
                ty,
                args,
                initializers,
            },
            span,
        ))
    }

    /// `{ Member = value, ... }` with an optional trailing comma.
    fn parse_initializers(&mut self, class: NodeId) -> Result<NodeRange, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let (member, member_span) = self.cursor.expect_ident()?;
            self.expect(TokenKind::Eq)?;
            let value = self.parse_expression()?;
            let span = member_span.merge(self.arena.span(value));
            entries.push(self.alloc(
                NodeKind::CtorAssignment {
                    class,
                    member,
                    value,
                },
                span,
            ));
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance()?;
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.arena.alloc_list(entries))
    }
}
