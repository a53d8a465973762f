//! Async interpreter for Serein.Script.
//!
//! Executes an analyzed [`Program`](serein_ir::Program) against a
//! [`TypeTable`](serein_types::TypeTable):
//!
//! - [`Interpreter`]: evaluates nodes as boxed `Send` futures
//! - [`evaluate_binary`]: the binary operator evaluator
//! - [`InvocationContext`]: variables, return signal, strict-null option and
//!   cancellation for one run
//! - [`DelegateCache`]: per-node memoized member, call and constructor
//!   resolution, shared by every run of a script

mod builtins;
mod cache;
mod context;
mod interpreter;
mod operators;

pub use cache::{Accessor, CacheKey, DelegateCache};
pub use context::{CancellationToken, InvocationContext};
pub use interpreter::{EvalFuture, Interpreter};
pub use operators::evaluate_binary;

#[cfg(test)]
mod tests;
