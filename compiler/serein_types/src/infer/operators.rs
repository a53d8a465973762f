//! Binary operator typing.

use serein_diagnostic::ErrorCode;
use serein_ir::{BinaryOp, NodeId, ScriptType, Span};

use super::Checker;
use crate::TypeError;

impl Checker<'_> {
    pub(super) fn infer_binary(
        &mut self,
        left: NodeId,
        op: BinaryOp,
        right: NodeId,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let lhs = self.infer(left)?;
        let rhs = self.infer(right)?;
        binary_result(op, &lhs, &rhs).ok_or_else(|| {
            self.error(
                ErrorCode::E2002,
                format!("operator `{op}` cannot be applied to `{lhs}` and `{rhs}`"),
                span,
            )
        })
    }
}

/// Result type of `lhs op rhs`, or `None` if the operands are invalid.
///
/// `object` operands are accepted everywhere; the interpreter checks them.
pub(crate) fn binary_result(
    op: BinaryOp,
    lhs: &ScriptType,
    rhs: &ScriptType,
) -> Option<ScriptType> {
    use ScriptType as T;

    if *lhs == T::Void || *rhs == T::Void {
        return None;
    }
    let dynamic = *lhs == T::Object || *rhs == T::Object;

    if op.is_logical() {
        let ok = |t: &ScriptType| matches!(t, T::Bool | T::Object);
        return (ok(lhs) && ok(rhs)).then_some(T::Bool);
    }

    if op.is_comparison() {
        let ok = if dynamic {
            true
        } else if op.is_ordering() {
            (lhs.is_numeric() && rhs.is_numeric())
                || matches!((lhs, rhs), (T::Char, T::Char) | (T::String, T::String))
        } else {
            (lhs.is_numeric() && rhs.is_numeric()) || lhs == rhs
        };
        return ok.then_some(T::Bool);
    }

    if op == BinaryOp::Add && (*lhs == T::String || *rhs == T::String) {
        return Some(T::String);
    }
    if dynamic {
        return Some(T::Object);
    }
    ScriptType::promote(lhs, rhs)
}
