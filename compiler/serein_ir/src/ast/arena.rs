//! Arena allocation for the flat AST.

use super::{ClassField, Node, NodeKind};
use crate::{FieldRange, NodeId, NodeRange, Span};

/// Contiguous storage for every node of one script.
///
/// - All nodes stored in one `Vec`, indexed by `NodeId`
/// - Child lists are `NodeRange`s into `lists`
/// - Class fields are `FieldRange`s into `fields`
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct NodeArena {
    nodes: Vec<Node>,
    lists: Vec<NodeId>,
    fields: Vec<ClassField>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 node per 6 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 6;
        NodeArena {
            nodes: Vec::with_capacity(estimated),
            lists: Vec::with_capacity(estimated / 2),
            fields: Vec::new(),
        }
    }

    #[inline]
    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::new(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1));
        self.nodes.push(Node::new(kind, span));
        id
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Allocate a child list, returning its range.
    pub fn alloc_list(&mut self, ids: impl IntoIterator<Item = NodeId>) -> NodeRange {
        let start = self.lists.len();
        self.lists.extend(ids);
        let len = self.lists.len() - start;
        NodeRange::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(len).unwrap_or(u32::MAX),
        )
    }

    #[inline]
    pub fn get_list(&self, range: NodeRange) -> &[NodeId] {
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    pub fn alloc_fields(&mut self, fields: impl IntoIterator<Item = ClassField>) -> FieldRange {
        let start = self.fields.len();
        self.fields.extend(fields);
        let len = self.fields.len() - start;
        FieldRange {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            len: u32::try_from(len).unwrap_or(u32::MAX),
        }
    }

    #[inline]
    pub fn get_fields(&self, range: FieldRange) -> &[ClassField] {
        let start = range.start as usize;
        &self.fields[start..start + range.len()]
    }

    /// Number of nodes. Per-node side tables are sized by this.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node id in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId::new(u32::try_from(i).unwrap_or(u32::MAX - 1)))
    }
}
