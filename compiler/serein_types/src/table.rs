//! The analyzer's output.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use serein_ir::{Name, NodeId, ScriptType};

bitflags! {
    /// Per-node facts recorded alongside the type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u8 {
        /// The call returns `Task`/`Task<T>` and must be awaited.
        const ASYNC_CALL = 1 << 0;
        /// Member, method or index access on an `object` receiver,
        /// resolved at run time.
        const DYNAMIC = 1 << 1;
    }
}

static VOID: ScriptType = ScriptType::Void;

/// Types for every node of one program, indexed by `NodeId`.
///
/// Built once by [`TypeAnalyzer`](crate::TypeAnalyzer) and read-only
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeTable {
    types: Vec<ScriptType>,
    flags: Vec<NodeFlags>,
    variables: FxHashMap<Name, ScriptType>,
    return_type: ScriptType,
}

impl TypeTable {
    pub(crate) fn new(
        types: Vec<ScriptType>,
        flags: Vec<NodeFlags>,
        variables: FxHashMap<Name, ScriptType>,
        return_type: ScriptType,
    ) -> Self {
        TypeTable {
            types,
            flags,
            variables,
            return_type,
        }
    }

    /// Number of nodes covered; equals the arena length of the program the
    /// table was built for.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type of a node. Nodes outside the table read as `void`.
    pub fn type_of(&self, id: NodeId) -> &ScriptType {
        self.types.get(id.index()).unwrap_or(&VOID)
    }

    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.flags.get(id.index()).copied().unwrap_or_default()
    }

    #[inline]
    pub fn is_async_call(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::ASYNC_CALL)
    }

    #[inline]
    pub fn is_dynamic(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::DYNAMIC)
    }

    /// Whether any call in the program is asynchronous.
    pub fn has_async_calls(&self) -> bool {
        self.flags.iter().any(|f| f.contains(NodeFlags::ASYNC_CALL))
    }

    /// The type bound to a variable, by first assignment or as a parameter.
    pub fn variable(&self, name: Name) -> Option<&ScriptType> {
        self.variables.get(&name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (Name, &ScriptType)> {
        self.variables.iter().map(|(name, ty)| (*name, ty))
    }

    /// Result type of the whole program.
    pub fn return_type(&self) -> &ScriptType {
        &self.return_type
    }
}
