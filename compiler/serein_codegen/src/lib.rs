//! C# Source Backend for Serein.Script
//!
//! Walks an analyzed program a second time and emits an equivalent C#
//! method, so a script can be frozen into regular compiled code instead of
//! being interpreted.
//!
//! # Architecture
//!
//! ```text
//! Program + TypeTable
//!        ↓
//!   Declarations  (usings, record classes, locals)
//!        ↓
//!     csharp      (statement and expression emission)
//!        ↓
//!   CompiledMethod (source + signature facts)
//! ```
//!
//! The backend only reads the program and its table. Emitting the same
//! program twice produces the same text.

mod analysis;
mod context;
pub mod csharp;
mod error;

use serein_ir::{Program, ScriptType};
use serein_types::TypeTable;

pub use analysis::Declarations;
pub use context::CodegenContext;
pub use error::CodegenError;

/// Names used in the generated unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodegenOptions {
    /// The static class holding the generated method.
    pub class_name: String,
    /// The class mounted functions are called through.
    pub function_host: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            class_name: "Script".to_owned(),
            function_host: "ScriptFunctions".to_owned(),
        }
    }
}

impl CodegenOptions {
    #[must_use]
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    #[must_use]
    pub fn with_function_host(mut self, host: impl Into<String>) -> Self {
        self.function_host = host.into();
        self
    }
}

/// One parameter of the generated method.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamInfo {
    pub name: String,
    pub ty: ScriptType,
    /// Type as spelled in the generated source.
    pub cs_type: String,
}

/// The generated unit plus what a host needs to call it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompiledMethod {
    pub class_name: String,
    pub method_name: String,
    /// Complete compilation unit: usings, record classes and the method.
    pub source: String,
    pub params: Vec<ParamInfo>,
    /// Result type before any `Task` wrapping.
    pub return_type: ScriptType,
    pub is_async: bool,
}

/// Emit `program` as a static method named `method_name`.
///
/// `table` must have been built for `program`; `params` are the host
/// parameters the program was analyzed with, in signature order.
#[tracing::instrument(level = "debug", skip_all, fields(method = method_name))]
pub fn compile<S: AsRef<str>>(
    method_name: &str,
    program: &Program,
    table: &TypeTable,
    params: &[(S, ScriptType)],
    options: &CodegenOptions,
) -> Result<CompiledMethod, CodegenError> {
    let nodes = program.arena().len();
    if table.len() != nodes {
        return Err(CodegenError::TableMismatch {
            table: table.len(),
            program: nodes,
        });
    }
    check_name(method_name, "method", csharp::syntax::is_identifier)?;
    check_name(&options.class_name, "class", csharp::syntax::is_identifier)?;
    check_name(
        &options.function_host,
        "function host",
        csharp::syntax::is_qualified_name,
    )?;

    let params = params
        .iter()
        .map(|(name, ty)| {
            let name = name.as_ref();
            check_name(name, "parameter", csharp::syntax::is_identifier)?;
            Ok(ParamInfo {
                name: name.to_owned(),
                ty: ty.clone(),
                cs_type: csharp::syntax::type_name(ty),
            })
        })
        .collect::<Result<Vec<_>, CodegenError>>()?;

    let is_async = table.has_async_calls();
    let return_type = table.return_type().clone();
    let mut ctx = CodegenContext::new(program, table, options);
    csharp::emit_unit(&mut ctx, method_name, &params)?;
    let source = ctx.take_output();
    tracing::debug!(bytes = source.len(), is_async, "emitted method");

    Ok(CompiledMethod {
        class_name: options.class_name.clone(),
        method_name: method_name.to_owned(),
        source,
        params,
        return_type,
        is_async,
    })
}

fn check_name(name: &str, role: &'static str, valid: fn(&str) -> bool) -> Result<(), CodegenError> {
    if valid(name) {
        Ok(())
    } else {
        Err(CodegenError::InvalidName {
            name: name.to_owned(),
            role,
        })
    }
}

#[cfg(test)]
mod tests;
