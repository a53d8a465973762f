//! Serein IR - shared data structures for the Serein.Script toolchain.
//!
//! This crate contains the types every stage agrees on:
//! - Spans and the line index used for diagnostics
//! - Interned names
//! - Tokens produced by the lexer
//! - The arena-allocated AST produced by the parser
//! - `ScriptType`, the type descriptor shared by the analyzer, the
//!   interpreter, the source backend and the host registries
//!
//! # Design
//!
//! - **Flatten everything**: nodes live in one vector, children are
//!   `NodeId(u32)` indices, child lists are `NodeRange`s.
//! - **Intern identifiers**: every identifier and string literal is a `Name`.
//! - Floats are stored as raw bits so nodes and tokens stay `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod line_index;
mod name;
mod node_id;
mod script_type;
mod span;
mod token;
pub mod visitor;

pub use ast::{BinaryOp, ClassField, Node, NodeArena, NodeKind, Program};
pub use interner::{SharedInterner, StringInterner};
pub use line_index::{LineIndex, SourceLocation};
pub use name::Name;
pub use node_id::{FieldRange, NodeId, NodeRange};
pub use script_type::ScriptType;
pub use span::{Span, Spanned};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;
