//! Engine-owned registries of mounted functions and types.
//!
//! Registration happens while the host sets the engine up; scripts only
//! read, except for declaring record types (first writer wins). Both
//! registries are behind `RwLock`s so concurrent runs can look up freely.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{ExternalType, MountedFunction, RecordLayout};

/// Mounted functions, by exact (case-sensitive) name.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: RwLock<FxHashMap<Arc<str>, Arc<MountedFunction>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `function` under `name`, replacing any previous one.
    pub fn register(&self, name: &str, function: MountedFunction) -> Option<Arc<MountedFunction>> {
        debug!(name, "mounting function");
        self.functions
            .write()
            .insert(Arc::from(name), Arc::new(function))
    }

    pub fn get(&self, name: &str) -> Option<Arc<MountedFunction>> {
        self.functions.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.functions.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.read().is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// A registered type: mounted by the host or declared by a script.
#[derive(Clone, Debug)]
pub enum TypeDescriptor {
    External(Arc<ExternalType>),
    Record(Arc<RecordLayout>),
}

/// Mounted and script-declared types, by name.
#[derive(Default, Debug)]
pub struct TypeRegistry {
    types: RwLock<FxHashMap<Arc<str>, TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a host type under `alias`, or under its own name.
    pub fn register_external(&self, ty: ExternalType, alias: Option<&str>) {
        let ty = match alias {
            Some(alias) if alias != ty.name() => ty.renamed(alias),
            _ => ty,
        };
        debug!(name = ty.name(), "mounting type");
        let name: Arc<str> = Arc::from(ty.name());
        self.types
            .write()
            .insert(name, TypeDescriptor::External(Arc::new(ty)));
    }

    /// Declare a script record type. Returns `false`, leaving the registry
    /// untouched, when the name is already taken.
    pub fn declare_record(&self, layout: RecordLayout) -> bool {
        let mut types = self.types.write();
        if types.contains_key(layout.name()) {
            debug!(name = layout.name(), "record type already defined, skipping");
            return false;
        }
        debug!(name = layout.name(), "declaring record type");
        types.insert(
            Arc::from(layout.name()),
            TypeDescriptor::Record(Arc::new(layout)),
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.read().get(name).cloned()
    }

    pub fn external(&self, name: &str) -> Option<Arc<ExternalType>> {
        match self.get(name)? {
            TypeDescriptor::External(ty) => Some(ty),
            TypeDescriptor::Record(_) => None,
        }
    }

    pub fn record(&self, name: &str) -> Option<Arc<RecordLayout>> {
        match self.get(name)? {
            TypeDescriptor::Record(layout) => Some(layout),
            TypeDescriptor::External(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

/// Both registries, cheaply cloneable and shared by every script an engine
/// compiles.
#[derive(Clone, Default, Debug)]
pub struct Registries {
    pub functions: Arc<FunctionRegistry>,
    pub types: Arc<TypeRegistry>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }
}
