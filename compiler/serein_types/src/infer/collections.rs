//! Indexing and array literals.

use serein_diagnostic::ErrorCode;
use serein_ir::{NodeId, NodeKind, NodeRange, ScriptType, Span};

use super::Checker;
use crate::{NodeFlags, TypeError};

impl Checker<'_> {
    /// Type of a `CollectionIndex` node. `write` requires a settable slot.
    pub(super) fn infer_index(&mut self, id: NodeId, write: bool) -> Result<ScriptType, TypeError> {
        let program = self.program;
        let span = program.arena().span(id);
        let NodeKind::CollectionIndex { collection, index } = *program.arena().kind(id) else {
            return Err(self.error(ErrorCode::E2006, "expected an indexing expression", span));
        };
        let receiver = self.infer(collection)?;
        let key = self.infer(index)?;

        let (expected_key, element) = match &receiver {
            ScriptType::Object => {
                self.mark(id, NodeFlags::DYNAMIC);
                return Ok(ScriptType::Object);
            }
            ScriptType::Array(element) | ScriptType::List(element) => {
                (ScriptType::Int, (**element).clone())
            }
            ScriptType::Dictionary(k, v) => ((**k).clone(), (**v).clone()),
            ScriptType::String => {
                if write {
                    return Err(self.error(
                        ErrorCode::E2011,
                        "characters of a `string` cannot be assigned",
                        span,
                    ));
                }
                (ScriptType::Int, ScriptType::Char)
            }
            ScriptType::Named(name) => {
                let indexer = self.registries.types.external(name).and_then(|ty| {
                    ty.indexer().map(|ix| {
                        (
                            ix.key_type().clone(),
                            ix.value_type().clone(),
                            ix.is_writable(),
                        )
                    })
                });
                match indexer {
                    Some((k, v, writable)) => {
                        if write && !writable {
                            return Err(self.error(
                                ErrorCode::E2011,
                                format!("the indexer of `{receiver}` is read-only"),
                                span,
                            ));
                        }
                        (k, v)
                    }
                    None => return Err(self.no_indexer(&receiver, span)),
                }
            }
            _ => return Err(self.no_indexer(&receiver, span)),
        };

        let key_fits = if expected_key == ScriptType::Int {
            key.is_integral() || key == ScriptType::Object
        } else {
            key == ScriptType::Object || self.assignable(&expected_key, &key, index)
        };
        if !key_fits {
            return Err(self.error(
                ErrorCode::E2006,
                format!("`{receiver}` cannot be indexed by a value of type `{key}`"),
                span,
            ));
        }
        Ok(element)
    }

    #[cold]
    fn no_indexer(&self, receiver: &ScriptType, span: Span) -> TypeError {
        self.error(
            ErrorCode::E2006,
            format!("type `{receiver}` cannot be indexed"),
            span,
        )
    }

    pub(super) fn infer_collection_assignment(
        &mut self,
        index: NodeId,
        value: NodeId,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let slot = self.infer_index(index, true)?;
        self.record(index, slot.clone());
        let value_ty = self.infer(value)?;
        if value_ty == ScriptType::Void || !self.assignable(&slot, &value_ty, value) {
            return Err(self.error(
                ErrorCode::E2001,
                format!("cannot store a value of type `{value_ty}` in an element of type `{slot}`"),
                span,
            ));
        }
        Ok(ScriptType::Void)
    }

    /// `[a, b, ...]`: `T[]` when every element is `T`, the widest numeric
    /// type when all are numeric, otherwise `object[]`.
    pub(super) fn infer_array(&mut self, elements: NodeRange) -> Result<ScriptType, TypeError> {
        let ids = self.list(elements);
        let types = self.infer_all(ids)?;
        if let Some(pos) = types.iter().position(|t| *t == ScriptType::Void) {
            let span = self.program.arena().span(ids[pos]);
            return Err(self.error(ErrorCode::E2001, "array element has no value", span));
        }

        let has_null = ids.iter().any(|&id| self.is_null_literal(id));
        let mut typed = ids
            .iter()
            .zip(&types)
            .filter(|&(&id, _)| !self.is_null_literal(id))
            .map(|(_, ty)| ty);
        let Some(first) = typed.next() else {
            return Ok(ScriptType::array(ScriptType::Object));
        };

        let mut common = Some(first.clone());
        for ty in typed {
            common = common.and_then(|c| {
                if c == *ty {
                    Some(c)
                } else if !has_null {
                    ScriptType::promote(&c, ty)
                } else {
                    None
                }
            });
        }
        let element = match common {
            Some(t) if !has_null || t.is_reference() => t,
            _ => ScriptType::Object,
        };
        Ok(ScriptType::array(element))
    }
}
