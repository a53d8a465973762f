//! Arena-allocated AST.
//!
//! A parsed script is a `Program`: one `NodeArena` plus the range of
//! top-level statements. The arena is append-only while parsing and
//! read-only afterwards; analysis, interpretation and source emission are
//! independent passes over the same arena.

mod arena;
mod node;
mod operators;
mod program;

pub use arena::NodeArena;
pub use node::{ClassField, Node, NodeKind};
pub use operators::BinaryOp;
pub use program::Program;
