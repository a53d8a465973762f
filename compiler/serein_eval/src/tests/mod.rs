#![allow(clippy::unwrap_used, clippy::expect_used)]

mod collection_tests;
mod control_tests;
mod operators_tests;

use serein_ir::{Program, ScriptType, SharedInterner};
use serein_runtime::{EvalError, EvalResult, Registries, Value};
use serein_types::{TypeAnalyzer, TypeTable};

use crate::{DelegateCache, Interpreter, InvocationContext};

/// A parsed and analyzed script plus the cache its runs share.
pub(crate) struct Compiled {
    pub program: Program,
    pub table: TypeTable,
    pub registries: Registries,
    pub cache: DelegateCache,
}

impl Compiled {
    pub fn new(source: &str, registries: Registries, params: &[(&str, ScriptType)]) -> Self {
        let interner = SharedInterner::new();
        let program = match serein_parse::parse(source, &interner) {
            Ok(program) => program,
            Err(err) => panic!("parse failed: {err}"),
        };
        let table = match TypeAnalyzer::new(&registries)
            .with_params(params.iter().cloned())
            .analyze(&program)
        {
            Ok(table) => table,
            Err(err) => panic!("analysis failed: {err} ({})", err.line_text()),
        };
        Compiled {
            program,
            table,
            registries,
            cache: DelegateCache::new(),
        }
    }

    pub async fn run(&self, ctx: &mut InvocationContext) -> EvalResult {
        Interpreter::new(&self.program, &self.table, &self.registries, &self.cache)
            .execute(ctx)
            .await
    }

    /// Row of the source line an error points at.
    pub fn row_of(&self, err: &EvalError) -> u32 {
        self.program.locate(err.span).row
    }
}

pub(crate) async fn run(source: &str) -> Value {
    let compiled = Compiled::new(source, Registries::new(), &[]);
    match compiled.run(&mut InvocationContext::new()).await {
        Ok(value) => value,
        Err(err) => panic!("run failed: {err}"),
    }
}

pub(crate) async fn run_err(source: &str) -> EvalError {
    let compiled = Compiled::new(source, Registries::new(), &[]);
    compiled
        .run(&mut InvocationContext::new())
        .await
        .expect_err("expected a runtime failure")
}
