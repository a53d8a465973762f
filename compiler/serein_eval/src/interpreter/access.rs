//! Member and collection access.
//!
//! Reads and writes resolve an [`Accessor`] through the delegate cache,
//! keyed by the receiver's runtime type, then apply it.

use serein_ir::{Name, NodeId, NodeKind};
use serein_runtime::{EvalError, EvalResult, Value};

use super::Interpreter;
use crate::builtins;
use crate::cache::{Accessor, CacheKey};
use crate::InvocationContext;

impl Interpreter<'_> {
    pub(super) async fn eval_member_access(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        object: NodeId,
        member: Name,
    ) -> EvalResult {
        let receiver = self.eval(ctx, object).await?;
        let member = self.name(member);
        if receiver.is_null() {
            return null_receiver(ctx, member);
        }
        match self.member_accessor(id, &receiver, member)? {
            Accessor::Property(property) => property.get(&receiver),
            Accessor::Field(index) => match &receiver {
                Value::Record(record) => record
                    .get_at(index)
                    .ok_or_else(|| EvalError::missing_member(record.layout().name(), member)),
                other => Err(EvalError::missing_member(&other.type_name(), member)),
            },
            Accessor::BuiltinProperty => builtins::property(&receiver, member)
                .ok_or_else(|| EvalError::missing_member(&receiver.type_name(), member)),
            _ => Err(EvalError::missing_member(&receiver.type_name(), member)),
        }
    }

    pub(super) async fn eval_member_assignment(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        object: NodeId,
        member: Name,
        value: NodeId,
    ) -> EvalResult {
        let receiver = self.eval(ctx, object).await?;
        let value = self.eval(ctx, value).await?;
        let member = self.name(member);
        if receiver.is_null() {
            return null_receiver(ctx, member);
        }
        self.set_member(id, &receiver, member, value)?;
        Ok(Value::Null)
    }

    /// Store `value` into `receiver.member`, widening it to the member type.
    /// Shared by member assignments and initializer blocks.
    pub(super) fn set_member(
        &self,
        id: NodeId,
        receiver: &Value,
        member: &str,
        value: Value,
    ) -> Result<(), EvalError> {
        match self.member_accessor(id, receiver, member)? {
            Accessor::Property(property) => {
                let value = value.coerce_to(property.ty());
                property.set(receiver, value)
            }
            Accessor::Field(index) => {
                let Value::Record(record) = receiver else {
                    return Err(EvalError::missing_member(&receiver.type_name(), member));
                };
                let value = match record.layout().fields().get(index) {
                    Some(field) => value.coerce_to(&field.ty),
                    None => value,
                };
                if record.set_at(index, value) {
                    Ok(())
                } else {
                    Err(EvalError::missing_member(record.layout().name(), member))
                }
            }
            _ => Err(EvalError::host(format!(
                "member `{member}` of type `{}` is read-only",
                receiver.type_name()
            ))),
        }
    }

    fn member_accessor(
        &self,
        id: NodeId,
        receiver: &Value,
        member: &str,
    ) -> Result<Accessor, EvalError> {
        let key = CacheKey::new(receiver.runtime_type());
        self.cache.get_or_resolve(id, key, |_| match receiver {
            Value::Record(record) => record
                .layout()
                .field_index(member)
                .map(Accessor::Field)
                .ok_or_else(|| EvalError::missing_member(record.layout().name(), member)),
            Value::External(external) => self
                .registries
                .types
                .external(external.type_name())
                .and_then(|ty| ty.property(member).cloned())
                .map(Accessor::Property)
                .ok_or_else(|| EvalError::missing_member(external.type_name(), member)),
            other if builtins::property(other, member).is_some() => Ok(Accessor::BuiltinProperty),
            other => Err(EvalError::missing_member(&other.type_name(), member)),
        })
    }

    pub(super) async fn eval_index(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        collection: NodeId,
        index: NodeId,
    ) -> EvalResult {
        let receiver = self.eval(ctx, collection).await?;
        let key = self.eval(ctx, index).await?;
        if receiver.is_null() {
            return null_receiver(ctx, "[]");
        }
        match self.index_accessor(id, &receiver)? {
            Accessor::Indexer(indexer) => {
                let key = key.coerce_to(indexer.key_type());
                indexer.get(&receiver, &key)
            }
            _ => builtins::get_index(&receiver, &key)
                .unwrap_or_else(|| Err(not_indexable(&receiver))),
        }
    }

    /// `collection[index] = value;` `index_node` is the `CollectionIndex`
    /// node, which also keys the cache entry.
    pub(super) async fn eval_collection_assignment(
        &self,
        ctx: &InvocationContext,
        index_node: NodeId,
        value: NodeId,
    ) -> EvalResult {
        let NodeKind::CollectionIndex { collection, index } = *self.program.arena().kind(index_node)
        else {
            return Err(EvalError::type_mismatch("an indexer", "an expression"));
        };
        let receiver = self.eval(ctx, collection).await?;
        let key = self.eval(ctx, index).await?;
        let value = self.eval(ctx, value).await?;
        if receiver.is_null() {
            return null_receiver(ctx, "[]");
        }
        let stored = match self.index_accessor(index_node, &receiver)? {
            Accessor::Indexer(indexer) => {
                let key = key.coerce_to(indexer.key_type());
                let value = value.coerce_to(indexer.value_type());
                indexer.set(&receiver, key, value)
            }
            Accessor::StringChar => Err(EvalError::host("strings are immutable")),
            _ => builtins::set_index(&receiver, &key, value)
                .unwrap_or_else(|| Err(not_indexable(&receiver))),
        };
        stored.map_err(|e| e.at(self.program.arena().span(index_node)))?;
        Ok(Value::Null)
    }

    fn index_accessor(&self, id: NodeId, receiver: &Value) -> Result<Accessor, EvalError> {
        let key = CacheKey::new(receiver.runtime_type());
        self.cache.get_or_resolve(id, key, |_| match receiver {
            Value::Array(_) => Ok(Accessor::ArrayElement),
            Value::List(_) => Ok(Accessor::ListElement),
            Value::Map(_) => Ok(Accessor::MapEntry),
            Value::Str(_) => Ok(Accessor::StringChar),
            Value::External(external) => self
                .registries
                .types
                .external(external.type_name())
                .and_then(|ty| ty.indexer().cloned())
                .map(Accessor::Indexer)
                .ok_or_else(|| not_indexable(receiver)),
            other => Err(not_indexable(other)),
        })
    }
}

/// Access on a null receiver: a failure under strict null handling,
/// otherwise the access yields null.
pub(super) fn null_receiver(ctx: &InvocationContext, member: &str) -> EvalResult {
    if ctx.strict_null() {
        Err(EvalError::null_receiver(member))
    } else {
        Ok(Value::Null)
    }
}

#[cold]
fn not_indexable(receiver: &Value) -> EvalError {
    EvalError::missing_member(&receiver.type_name(), "this[]")
}
