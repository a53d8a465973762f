//! Per-node memoization of member, call and constructor resolution.
//!
//! A node's first evaluation resolves an [`Accessor`] against the runtime
//! type of its receiver (and arguments, for calls) and stores it keyed by
//! node id. Later evaluations with the same runtime types reuse it. A
//! different runtime type re-resolves and overwrites the entry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use serein_ir::{NodeId, ScriptType};
use serein_runtime::{
    ConstructorDescriptor, IndexerDescriptor, MethodDescriptor, MountedFunction,
    PropertyDescriptor, RecordLayout, Value,
};
use smallvec::SmallVec;

/// Runtime types an accessor was resolved for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    receiver: ScriptType,
    args: SmallVec<[ScriptType; 4]>,
}

impl CacheKey {
    pub fn new(receiver: ScriptType) -> Self {
        CacheKey {
            receiver,
            args: SmallVec::new(),
        }
    }

    /// Key for a call: receiver type plus the runtime type of every
    /// argument. Null arguments key as `object`.
    pub fn for_call(receiver: ScriptType, args: &[Value]) -> Self {
        CacheKey {
            receiver,
            args: args.iter().map(Value::runtime_type).collect(),
        }
    }

    pub fn receiver(&self) -> &ScriptType {
        &self.receiver
    }
}

/// A resolved way to perform one node's access.
#[derive(Clone)]
pub enum Accessor {
    /// Host property.
    Property(PropertyDescriptor),
    /// Record field by layout position.
    Field(usize),
    /// `Length` / `Count` on a built-in value.
    BuiltinProperty,
    /// Host method overload.
    Method(MethodDescriptor),
    /// Method of a built-in value (`ToString`, `Substring`, `Add`, ...).
    BuiltinMethod,
    /// Host indexer.
    Indexer(IndexerDescriptor),
    ArrayElement,
    ListElement,
    MapEntry,
    StringChar,
    /// Mounted function.
    Function(Arc<MountedFunction>),
    /// Host constructor overload.
    Constructor(ConstructorDescriptor),
    /// Script record type.
    Record(Arc<RecordLayout>),
}

impl Accessor {
    pub fn label(&self) -> &'static str {
        match self {
            Accessor::Property(_) => "property",
            Accessor::Field(_) => "field",
            Accessor::BuiltinProperty => "builtin property",
            Accessor::Method(_) => "method",
            Accessor::BuiltinMethod => "builtin method",
            Accessor::Indexer(_) => "indexer",
            Accessor::ArrayElement => "array element",
            Accessor::ListElement => "list element",
            Accessor::MapEntry => "dictionary entry",
            Accessor::StringChar => "string char",
            Accessor::Function(_) => "function",
            Accessor::Constructor(_) => "constructor",
            Accessor::Record(_) => "record",
        }
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone)]
struct Entry {
    key: CacheKey,
    accessor: Accessor,
}

/// Accessor cache shared by every run of one compiled script.
///
/// Node ids are only meaningful for the program the cache was created
/// with; a script owns exactly one cache.
#[derive(Default)]
pub struct DelegateCache {
    entries: DashMap<NodeId, Entry, FxBuildHasher>,
    resolutions: AtomicUsize,
}

impl DelegateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accessor for `node`, resolving it with `resolve` unless an entry
    /// for the same key already exists.
    ///
    /// No map lock is held while `resolve` runs. Two runs racing on the same
    /// node both resolve, and the later write wins; resolution is pure, so
    /// both results are equivalent.
    pub fn get_or_resolve<E>(
        &self,
        node: NodeId,
        key: CacheKey,
        resolve: impl FnOnce(&CacheKey) -> Result<Accessor, E>,
    ) -> Result<Accessor, E> {
        if let Some(entry) = self.entries.get(&node) {
            if entry.key == key {
                tracing::trace!(
                    node = node.index(),
                    accessor = entry.accessor.label(),
                    "cache hit"
                );
                return Ok(entry.accessor.clone());
            }
            tracing::debug!(
                node = node.index(),
                cached = %entry.key.receiver,
                found = %key.receiver,
                "receiver type changed, re-resolving"
            );
        }
        let accessor = resolve(&key)?;
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(node = node.index(), accessor = accessor.label(), "resolved accessor");
        self.entries.insert(
            node,
            Entry {
                key,
                accessor: accessor.clone(),
            },
        );
        Ok(accessor)
    }

    /// How many times any accessor has been resolved.
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// Number of nodes with a cached accessor.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for DelegateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateCache")
            .field("entries", &self.entries.len())
            .field("resolutions", &self.resolutions())
            .finish()
    }
}
