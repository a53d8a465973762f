//! Type analysis for Serein.Script.
//!
//! One forward pass over the program assigns a [`ScriptType`] to every node
//! and produces a [`TypeTable`]. Identifiers live in a single flat symbol
//! table: a name is bound to the type of its first assignment (or to its
//! host parameter type) for the whole program, regardless of block nesting.
//!
//! Analysis is fatal on the first error and never shares state between
//! runs, so a failed analysis cannot affect another one. The only lasting
//! effect is declaring script record types in the engine's type registry,
//! where the first declaration of a name wins.

mod builtins;
mod error;
mod infer;
mod table;

use std::sync::Arc;

use serein_ir::{Program, ScriptType};
use serein_runtime::Registries;

pub use builtins::{builtin_method, builtin_property};
pub use error::TypeError;
pub use table::{NodeFlags, TypeTable};

/// Entry point for analyzing programs against an engine's registries.
pub struct TypeAnalyzer<'r> {
    registries: &'r Registries,
    params: Vec<(Arc<str>, ScriptType)>,
}

impl<'r> TypeAnalyzer<'r> {
    pub fn new(registries: &'r Registries) -> Self {
        TypeAnalyzer {
            registries,
            params: Vec::new(),
        }
    }

    /// Seed the symbol table with host-supplied parameter types.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (S, ScriptType)>,
        S: AsRef<str>,
    {
        self.params
            .extend(params.into_iter().map(|(name, ty)| (Arc::from(name.as_ref()), ty)));
        self
    }

    /// Analyze `program`, building a fresh table.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyze(&self, program: &Program) -> Result<TypeTable, TypeError> {
        let mut checker = infer::Checker::new(program, self.registries);
        for (name, ty) in &self.params {
            checker.bind_param(name, ty.clone());
        }
        checker.check_program()
    }
}

/// Analyze `program` without parameters.
pub fn analyze(program: &Program, registries: &Registries) -> Result<TypeTable, TypeError> {
    TypeAnalyzer::new(registries).analyze(program)
}

#[cfg(test)]
mod tests;
