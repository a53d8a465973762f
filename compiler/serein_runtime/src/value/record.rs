//! Script-declared record types.

use std::sync::Arc;

use parking_lot::RwLockReadGuard;
use rustc_hash::FxHashMap;
use serein_ir::ScriptType;

use super::{shared, Shared, Value};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordField {
    pub name: Arc<str>,
    pub ty: ScriptType,
}

/// Field layout of a record type, in declaration order.
#[derive(Debug)]
pub struct RecordLayout {
    name: Arc<str>,
    fields: Vec<RecordField>,
    indices: FxHashMap<Arc<str>, usize>,
}

impl RecordLayout {
    pub fn new(name: &str, fields: Vec<RecordField>) -> Self {
        let indices = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (Arc::clone(&field.name), i))
            .collect();
        RecordLayout {
            name: Arc::from(name),
            fields,
            indices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.field_index(name).and_then(|i| self.fields.get(i))
    }

    /// A fresh instance with every field at its type's default.
    pub fn instantiate(self: &Arc<Self>) -> RecordValue {
        let values = self
            .fields
            .iter()
            .map(|field| Value::default_for(&field.ty))
            .collect();
        RecordValue {
            layout: Arc::clone(self),
            values: shared(values),
        }
    }
}

impl PartialEq for RecordLayout {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

/// Record instance. Fields are stored in layout order.
#[derive(Clone)]
pub struct RecordValue {
    layout: Arc<RecordLayout>,
    values: Shared<Vec<Value>>,
}

impl RecordValue {
    pub fn layout(&self) -> &Arc<RecordLayout> {
        &self.layout
    }

    pub fn get(&self, field: &str) -> Option<Value> {
        let index = self.layout.field_index(field)?;
        self.values.read().get(index).cloned()
    }

    /// Field by layout position.
    pub fn get_at(&self, index: usize) -> Option<Value> {
        self.values.read().get(index).cloned()
    }

    /// Overwrite a field. `false` if the layout has no such field.
    pub fn set(&self, field: &str, value: Value) -> bool {
        self.layout
            .field_index(field)
            .is_some_and(|index| self.set_at(index, value))
    }

    pub fn set_at(&self, index: usize, value: Value) -> bool {
        match self.values.write().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.values.read()
    }

    pub fn ptr_eq(&self, other: &RecordValue) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    pub(crate) fn storage_ptr(&self) -> *const () {
        Arc::as_ptr(&self.values).cast()
    }
}
