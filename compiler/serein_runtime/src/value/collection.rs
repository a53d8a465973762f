//! Arrays, lists and dictionaries.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLockReadGuard, RwLockWriteGuard};
use serein_ir::ScriptType;

use super::{shared, Shared, Value};

/// Fixed-length array. Elements may be replaced, not added.
#[derive(Clone)]
pub struct ArrayValue {
    element: ScriptType,
    items: Shared<Vec<Value>>,
}

impl ArrayValue {
    pub fn new(element: ScriptType, items: Vec<Value>) -> Self {
        ArrayValue {
            element,
            items: shared(items),
        }
    }

    pub fn element(&self) -> &ScriptType {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.read().get(index).cloned()
    }

    /// Replace the element at `index`. `false` when out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.items.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.items.read()
    }

    pub fn ptr_eq(&self, other: &ArrayValue) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub(crate) fn storage_ptr(&self) -> *const () {
        Arc::as_ptr(&self.items).cast()
    }
}

/// Growable list.
#[derive(Clone)]
pub struct ListValue {
    element: ScriptType,
    items: Shared<Vec<Value>>,
}

impl ListValue {
    pub fn new(element: ScriptType, items: Vec<Value>) -> Self {
        ListValue {
            element,
            items: shared(items),
        }
    }

    pub fn element(&self) -> &ScriptType {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.read().get(index).cloned()
    }

    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.items.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Value) {
        self.items.write().push(value);
    }

    pub fn clear(&self) {
        self.items.write().clear();
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.read().iter().any(|item| item == value)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.items.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.items.write()
    }

    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub(crate) fn storage_ptr(&self) -> *const () {
        Arc::as_ptr(&self.items).cast()
    }
}

/// Dictionary key.
///
/// Integral keys are normalized so `1`, `1L` and `1u` address the same
/// entry. Floating-point values are not valid keys.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum MapKey {
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Str(Arc<str>),
}

impl MapKey {
    pub fn from_value(value: &Value) -> Option<MapKey> {
        let key = match value {
            Value::Bool(b) => MapKey::Bool(*b),
            Value::Char(c) => MapKey::Char(*c),
            Value::Str(s) => MapKey::Str(Arc::clone(s)),
            Value::ULong(n) => match i64::try_from(*n) {
                Ok(n) => MapKey::Int(n),
                Err(_) => MapKey::UInt(*n),
            },
            other => MapKey::Int(i64::try_from(other.as_i128()?).ok()?),
        };
        Some(key)
    }

    /// Rebuild a value of the dictionary's key type.
    pub fn to_value(&self, key_type: &ScriptType) -> Value {
        match self {
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Char(c) => Value::Char(*c),
            MapKey::Str(s) => Value::Str(Arc::clone(s)),
            MapKey::Int(n) => Value::from_i128(key_type, i128::from(*n))
                .unwrap_or(Value::Long(*n)),
            MapKey::UInt(n) => Value::ULong(*n),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(true) => f.write_str("True"),
            MapKey::Bool(false) => f.write_str("False"),
            MapKey::Char(c) => write!(f, "{c}"),
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::UInt(n) => write!(f, "{n}"),
            MapKey::Str(s) => f.write_str(s),
        }
    }
}

/// Dictionary with deterministic (key-ordered) iteration.
#[derive(Clone)]
pub struct MapValue {
    key: ScriptType,
    value: ScriptType,
    entries: Shared<BTreeMap<MapKey, Value>>,
}

impl MapValue {
    pub fn new(
        key: ScriptType,
        value: ScriptType,
        entries: impl IntoIterator<Item = (MapKey, Value)>,
    ) -> Self {
        MapValue {
            key,
            value,
            entries: shared(entries.into_iter().collect()),
        }
    }

    pub fn key_type(&self) -> &ScriptType {
        &self.key
    }

    pub fn value_type(&self) -> &ScriptType {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn get(&self, key: &MapKey) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    pub fn insert(&self, key: MapKey, value: Value) -> Option<Value> {
        self.entries.write().insert(key, value)
    }

    pub fn remove(&self, key: &MapKey) -> Option<Value> {
        self.entries.write().remove(key)
    }

    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, BTreeMap<MapKey, Value>> {
        self.entries.read()
    }

    pub fn ptr_eq(&self, other: &MapValue) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub(crate) fn storage_ptr(&self) -> *const () {
        Arc::as_ptr(&self.entries).cast()
    }
}
