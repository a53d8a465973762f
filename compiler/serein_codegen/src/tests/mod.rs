#![allow(clippy::unwrap_used, clippy::expect_used)]

mod host_tests;

use serein_ir::{Program, ScriptType, SharedInterner};
use serein_runtime::Registries;
use serein_types::{TypeAnalyzer, TypeTable};

use crate::{compile, CodegenOptions, CompiledMethod};

pub(crate) fn analyze(
    source: &str,
    registries: &Registries,
    params: &[(&str, ScriptType)],
) -> (Program, TypeTable) {
    let interner = SharedInterner::new();
    let program = match serein_parse::parse(source, &interner) {
        Ok(program) => program,
        Err(err) => panic!("parse failed: {err}"),
    };
    match TypeAnalyzer::new(registries)
        .with_params(params.iter().cloned())
        .analyze(&program)
    {
        Ok(table) => (program, table),
        Err(err) => panic!("analysis failed: {err}"),
    }
}

pub(crate) fn emit_in(
    source: &str,
    registries: &Registries,
    params: &[(&str, ScriptType)],
) -> CompiledMethod {
    let (program, table) = analyze(source, registries, params);
    compile("Run", &program, &table, params, &CodegenOptions::default())
        .unwrap_or_else(|err| panic!("emission failed: {err}"))
}

pub(crate) fn emit(source: &str) -> CompiledMethod {
    emit_in(source, &Registries::new(), &[])
}

/// Lines of the method body, without indentation.
pub(crate) fn body(method: &CompiledMethod) -> Vec<&str> {
    let lines: Vec<&str> = method.source.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.trim_start().starts_with("public static ") && line.contains('('))
        .expect("no method signature");
    // Skip the signature and the opening brace; drop the two closing braces.
    lines[start + 2..lines.len() - 2]
        .iter()
        .map(|line| line.trim())
        .collect()
}
