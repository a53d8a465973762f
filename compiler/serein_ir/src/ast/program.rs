//! A parsed script.

use super::NodeArena;
use crate::{LineIndex, Name, NodeId, NodeRange, SharedInterner, SourceLocation, Span};
use std::sync::Arc;

/// Parse output: the arena, the top-level statements and the source they
/// came from.
///
/// The program keeps the source text and its line index so any later stage
/// can turn a node span into a row and line text without re-reading input.
#[derive(Clone, Debug)]
pub struct Program {
    arena: NodeArena,
    statements: NodeRange,
    source: Arc<str>,
    line_index: LineIndex,
    interner: SharedInterner,
}

impl Program {
    pub fn new(
        arena: NodeArena,
        statements: NodeRange,
        source: Arc<str>,
        interner: SharedInterner,
    ) -> Self {
        let line_index = LineIndex::new(&source);
        Program {
            arena,
            statements,
            source,
            line_index,
            interner,
        }
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Top-level statements in source order.
    #[inline]
    pub fn statements(&self) -> &[NodeId] {
        self.arena.get_list(self.statements)
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Resolve a name produced while parsing this program.
    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Row, column and line text for a span in this program.
    pub fn locate(&self, span: Span) -> SourceLocation {
        self.line_index.locate(&self.source, span)
    }

    /// Row, column and line text for a node.
    pub fn locate_node(&self, id: NodeId) -> SourceLocation {
        self.locate(self.arena.span(id))
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.arena == other.arena
            && self.statements == other.statements
            && self.source == other.source
    }
}

impl Eq for Program {}
