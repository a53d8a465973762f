//! Binary operator evaluation.
//!
//! Enum dispatch over the operand kinds. Numeric operands are first
//! promoted to the wider type of the two, then computed in `i128` (integral)
//! or `f64` (floating) and narrowed back. Integral results wrap.

use std::cmp::Ordering;

use serein_ir::{BinaryOp, ScriptType};
use serein_runtime::{EvalError, EvalResult, Value};

/// Evaluate `left op right`.
///
/// `left_ty` and `right_ty` are the analyzer's static types for the operand
/// nodes: a `string`-typed operand makes `+` a concatenation even when its
/// value is null.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are consumed by the interpreter"
)]
pub fn evaluate_binary(
    left: Value,
    right: Value,
    op: BinaryOp,
    left_ty: &ScriptType,
    right_ty: &ScriptType,
) -> EvalResult {
    if op == BinaryOp::Add && is_string_operand(&left, left_ty, &right, right_ty) {
        return Ok(Value::string(format!(
            "{}{}",
            concat_text(&left),
            concat_text(&right)
        )));
    }
    if left.is_null() || right.is_null() {
        return Err(EvalError::null_operand(op));
    }

    match (&left, &right) {
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op, &left, &right),
        (Value::Str(a), Value::Str(b)) => {
            compare(a.as_ref().cmp(b.as_ref()), op, &left, &right)
        }
        (Value::Char(a), Value::Char(b)) => compare(a.cmp(b), op, &left, &right),
        _ => match ScriptType::promote(&left.runtime_type(), &right.runtime_type()) {
            Some(target) => eval_numeric_binary(&left, &right, op, &target),
            None => eval_reference_binary(&left, &right, op),
        },
    }
}

fn is_string_operand(
    left: &Value,
    left_ty: &ScriptType,
    right: &Value,
    right_ty: &ScriptType,
) -> bool {
    *left_ty == ScriptType::String
        || *right_ty == ScriptType::String
        || matches!(left, Value::Str(_))
        || matches!(right, Value::Str(_))
}

/// Null concatenates as the empty string.
fn concat_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(EvalError::invalid_operands(op, left, right)),
    }
}

/// Comparison operators over an already computed ordering.
fn compare(ordering: Ordering, op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let result = match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => return Err(EvalError::invalid_operands(op, left, right)),
    };
    Ok(Value::Bool(result))
}

fn eval_numeric_binary(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    target: &ScriptType,
) -> EvalResult {
    let mismatch = || EvalError::invalid_operands(op, left, right);
    if target.is_integral() {
        let (Some(a), Some(b)) = (left.as_i128(), right.as_i128()) else {
            return Err(mismatch());
        };
        let result = match op {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div => {
                if b == 0 {
                    return Err(EvalError::division_by_zero());
                }
                a.wrapping_div(b)
            }
            _ => return compare(a.cmp(&b), op, left, right),
        };
        return Value::from_i128(target, result).ok_or_else(mismatch);
    }

    let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
        return Err(mismatch());
    };
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(EvalError::division_by_zero());
            }
            a / b
        }
        // NaN compares unequal to everything, including itself.
        _ => {
            return match a.partial_cmp(&b) {
                Some(ordering) => compare(ordering, op, left, right),
                None if op == BinaryOp::NotEq => Ok(Value::Bool(true)),
                None if op.is_comparison() => Ok(Value::Bool(false)),
                None => Err(mismatch()),
            }
        }
    };
    Value::from_f64(target, result).ok_or_else(mismatch)
}

/// Anything else: `==`/`!=` compare identity for reference values and
/// report unequal for mismatched kinds.
fn eval_reference_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let same = left.same_reference(right);
    match op {
        BinaryOp::Eq => Ok(Value::Bool(same)),
        BinaryOp::NotEq => Ok(Value::Bool(!same)),
        _ => Err(EvalError::invalid_operands(op, left, right)),
    }
}
