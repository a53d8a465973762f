//! A compiled script.

use std::sync::Arc;

use serein_codegen::{CodegenOptions, CompiledMethod};
use serein_eval::{DelegateCache, Interpreter, InvocationContext};
use serein_ir::{Program, ScriptType};
use serein_runtime::{EvalError, Registries, Value};
use serein_types::TypeTable;

use crate::ScriptError;

/// A parsed and analyzed program, ready to run any number of times.
///
/// `Script` is `Send + Sync`; concurrent runs each get their own
/// [`InvocationContext`] and share the member-dispatch cache.
pub struct Script {
    program: Program,
    table: TypeTable,
    params: Vec<(Arc<str>, ScriptType)>,
    registries: Arc<Registries>,
    cache: Arc<DelegateCache>,
    strict_null: bool,
}

impl Script {
    pub(crate) fn new(
        program: Program,
        table: TypeTable,
        params: Vec<(Arc<str>, ScriptType)>,
        registries: Arc<Registries>,
        cache: Arc<DelegateCache>,
        strict_null: bool,
    ) -> Self {
        Script {
            program,
            table,
            params,
            registries,
            cache,
            strict_null,
        }
    }

    /// Result type of the whole program.
    pub fn return_type(&self) -> &ScriptType {
        self.table.return_type()
    }

    pub fn type_table(&self) -> &TypeTable {
        &self.table
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Host parameters, in declaration order.
    pub fn params(&self) -> &[(Arc<str>, ScriptType)] {
        &self.params
    }

    pub fn cache(&self) -> &DelegateCache {
        &self.cache
    }

    /// A fresh context configured the way this script's engine is.
    pub fn context(&self) -> InvocationContext {
        InvocationContext::new().with_strict_null(self.strict_null)
    }

    /// Run once with the given arguments.
    ///
    /// Arguments are checked against the parameter types and widened to
    /// them; parameters left out start at their type's default. A `void`
    /// script yields null. Disposable values are released when the run
    /// ends, whether it succeeded, failed or was dropped before finishing.
    pub async fn run<I, S>(&self, args: I) -> Result<Value, ScriptError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut ctx = self.context();
        for (name, ty) in &self.params {
            ctx.set(name, Value::default_for(ty));
        }
        for (name, value) in args {
            let name = name.as_ref();
            let value = self.bind_arg(name, value)?;
            ctx.set(name, value);
        }
        let mut run = ExitOnDrop(ctx);
        let result = self.run_with(&mut run.0).await;
        drop(run);
        result
    }

    /// Run in a caller-owned context. The caller decides when to call
    /// [`InvocationContext::on_exit`].
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn run_with(&self, ctx: &mut InvocationContext) -> Result<Value, ScriptError> {
        let interpreter =
            Interpreter::new(&self.program, &self.table, &self.registries, &self.cache);
        match interpreter.execute(ctx).await {
            Ok(_) if *self.return_type() == ScriptType::Void => Ok(Value::Null),
            Ok(value) => Ok(value),
            Err(error) => Err(ScriptError::runtime(error, &self.program)),
        }
    }

    /// Emit this script as a C# method with default names.
    pub fn transpile(&self, method_name: &str) -> Result<CompiledMethod, ScriptError> {
        self.transpile_with(method_name, &CodegenOptions::default())
    }

    pub fn transpile_with(
        &self,
        method_name: &str,
        options: &CodegenOptions,
    ) -> Result<CompiledMethod, ScriptError> {
        let params: Vec<(&str, ScriptType)> = self
            .params
            .iter()
            .map(|(name, ty)| (name.as_ref(), ty.clone()))
            .collect();
        Ok(serein_codegen::compile(
            method_name,
            &self.program,
            &self.table,
            &params,
            options,
        )?)
    }

    fn bind_arg(&self, name: &str, value: Value) -> Result<Value, ScriptError> {
        let Some((_, ty)) = self.params.iter().find(|(param, _)| param.as_ref() == name) else {
            let error = EvalError::host(format!("`{name}` is not a parameter of this script"));
            return Err(error.into());
        };
        if value.is_null() {
            if ty.is_reference() {
                return Ok(value);
            }
            return Err(EvalError::type_mismatch(&ty.to_string(), "null").into());
        }
        let found = value.runtime_type();
        if !ty.accepts(&found) {
            return Err(EvalError::type_mismatch(&ty.to_string(), &found.to_string()).into());
        }
        Ok(value.coerce_to(ty))
    }
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("return_type", self.return_type())
            .field("params", &self.params)
            .field("nodes", &self.table.len())
            .finish_non_exhaustive()
    }
}

/// Owns the context of a [`Script::run`] and exits it when dropped, so a
/// run abandoned at an `await` still disposes its host objects.
struct ExitOnDrop(InvocationContext);

impl Drop for ExitOnDrop {
    fn drop(&mut self) {
        self.0.on_exit();
    }
}
