#![allow(clippy::unwrap_used, clippy::expect_used)]

mod error_tests;
mod infer_tests;

use crate::{TypeAnalyzer, TypeError, TypeTable};
use serein_ir::{NodeId, Program, ScriptType, SharedInterner};
use serein_runtime::Registries;

pub(crate) fn parse(source: &str) -> Program {
    let interner = SharedInterner::new();
    match serein_parse::parse(source, &interner) {
        Ok(program) => program,
        Err(err) => panic!("parse failed: {err}"),
    }
}

pub(crate) fn check(source: &str) -> (Program, TypeTable) {
    check_in(source, &Registries::new())
}

pub(crate) fn check_in(source: &str, registries: &Registries) -> (Program, TypeTable) {
    let program = parse(source);
    match TypeAnalyzer::new(registries).analyze(&program) {
        Ok(table) => (program, table),
        Err(err) => panic!("analysis failed: {err} ({})", err.line_text()),
    }
}

pub(crate) fn check_err(source: &str) -> TypeError {
    check_err_in(source, &Registries::new())
}

pub(crate) fn check_err_in(source: &str, registries: &Registries) -> TypeError {
    let program = parse(source);
    TypeAnalyzer::new(registries)
        .analyze(&program)
        .expect_err("expected a type error")
}

/// Type bound to a variable.
pub(crate) fn var(program: &Program, table: &TypeTable, name: &str) -> ScriptType {
    let name = program.interner().get(name).expect("name was never interned");
    table.variable(name).cloned().expect("variable not bound")
}

/// First node with the given kind label, in allocation order.
pub(crate) fn find(program: &Program, label: &str) -> NodeId {
    program
        .arena()
        .ids()
        .find(|&id| program.arena().kind(id).label() == label)
        .unwrap_or_else(|| panic!("no {label} node"))
}
