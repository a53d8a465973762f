#![allow(clippy::unwrap_used, clippy::expect_used)]

mod expr_tests;
mod stmt_tests;

use crate::{parse, ParseError, Parser};
use serein_ir::{NodeId, NodeKind, Program, SharedInterner};

pub(crate) fn parse_ok(source: &str) -> Program {
    let interner = SharedInterner::new();
    match parse(source, &interner) {
        Ok(program) => program,
        Err(err) => panic!("parse failed: {err} ({})", err.line_text()),
    }
}

pub(crate) fn parse_err(source: &str) -> ParseError {
    let interner = SharedInterner::new();
    parse(source, &interner).expect_err("expected a parse error")
}

pub(crate) fn parse_with_limit(source: &str, limit: usize) -> Result<Program, ParseError> {
    let interner = SharedInterner::new();
    Parser::new(source, &interner)?
        .with_lookahead_limit(limit)
        .parse_program()
}

pub(crate) fn kind(program: &Program, id: NodeId) -> &NodeKind {
    program.arena().kind(id)
}

/// The single top-level statement of a program.
pub(crate) fn only_statement(program: &Program) -> NodeId {
    assert_eq!(program.statements().len(), 1, "expected one statement");
    program.statements()[0]
}
