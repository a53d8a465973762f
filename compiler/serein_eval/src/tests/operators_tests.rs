use pretty_assertions::assert_eq;
use serein_diagnostic::ErrorCode;
use serein_ir::{BinaryOp, ScriptType};
use serein_runtime::Value;

use crate::evaluate_binary;

fn eval(left: Value, op: BinaryOp, right: Value) -> Value {
    let (lt, rt) = (left.runtime_type(), right.runtime_type());
    evaluate_binary(left, right, op, &lt, &rt).unwrap()
}

fn eval_code(left: Value, op: BinaryOp, right: Value) -> ErrorCode {
    let (lt, rt) = (left.runtime_type(), right.runtime_type());
    evaluate_binary(left, right, op, &lt, &rt)
        .unwrap_err()
        .code()
}

#[test]
fn test_arithmetic_promotes_to_wider_operand() {
    assert_eq!(eval(Value::Int(1), BinaryOp::Add, Value::Long(2)), Value::Long(3));
    assert_eq!(eval(Value::Int(7), BinaryOp::Div, Value::Int(2)), Value::Int(3));
    assert_eq!(
        eval(Value::Int(1), BinaryOp::Add, Value::Double(0.5)),
        Value::Double(1.5)
    );
    assert_eq!(
        eval(Value::Float(1.5), BinaryOp::Mul, Value::Int(2)),
        Value::Float(3.0)
    );
    assert_eq!(
        eval(Value::Decimal(2.5), BinaryOp::Sub, Value::Double(0.5)),
        Value::Decimal(2.0)
    );
}

#[test]
fn test_integer_arithmetic_wraps() {
    assert_eq!(
        eval(Value::Int(i32::MAX), BinaryOp::Add, Value::Int(1)),
        Value::Int(i32::MIN)
    );
    assert_eq!(
        eval(Value::Long(i64::MIN), BinaryOp::Sub, Value::Long(1)),
        Value::Long(i64::MAX)
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        eval(Value::string("a"), BinaryOp::Add, Value::Int(1)),
        Value::string("a1")
    );
    assert_eq!(
        eval(Value::Bool(true), BinaryOp::Add, Value::string("!")),
        Value::string("True!")
    );
    assert_eq!(
        eval(Value::string("x"), BinaryOp::Add, Value::Char('y')),
        Value::string("xy")
    );
}

#[test]
fn test_null_concatenates_when_statically_a_string() {
    let result = evaluate_binary(
        Value::Null,
        Value::string("b"),
        BinaryOp::Add,
        &ScriptType::String,
        &ScriptType::String,
    )
    .unwrap();
    assert_eq!(result, Value::string("b"));

    let result = evaluate_binary(
        Value::Null,
        Value::Int(1),
        BinaryOp::Add,
        &ScriptType::String,
        &ScriptType::Int,
    )
    .unwrap();
    assert_eq!(result, Value::string("1"));
}

#[test]
fn test_null_operand_rejected() {
    assert_eq!(eval_code(Value::Null, BinaryOp::Add, Value::Int(1)), ErrorCode::E3001);
    assert_eq!(eval_code(Value::Int(1), BinaryOp::Lt, Value::Null), ErrorCode::E3001);
    assert_eq!(eval_code(Value::Null, BinaryOp::Eq, Value::Null), ErrorCode::E3001);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval_code(Value::Int(1), BinaryOp::Div, Value::Int(0)), ErrorCode::E3002);
    assert_eq!(eval_code(Value::Long(1), BinaryOp::Div, Value::Byte(0)), ErrorCode::E3002);
    assert_eq!(
        eval_code(Value::Double(1.0), BinaryOp::Div, Value::Double(0.0)),
        ErrorCode::E3002
    );
}

#[test]
fn test_comparisons() {
    assert_eq!(eval(Value::Int(1), BinaryOp::Lt, Value::Long(2)), Value::Bool(true));
    assert_eq!(eval(Value::Int(2), BinaryOp::GtEq, Value::Double(2.0)), Value::Bool(true));
    assert_eq!(eval(Value::Char('a'), BinaryOp::Lt, Value::Char('b')), Value::Bool(true));
    assert_eq!(
        eval(Value::string("abc"), BinaryOp::Lt, Value::string("abd")),
        Value::Bool(true)
    );
    // Ordinal: uppercase sorts before lowercase.
    assert_eq!(
        eval(Value::string("Z"), BinaryOp::Lt, Value::string("a")),
        Value::Bool(true)
    );
    assert_eq!(
        eval(Value::string("x"), BinaryOp::Eq, Value::string("x")),
        Value::Bool(true)
    );
    assert_eq!(eval(Value::Bool(true), BinaryOp::NotEq, Value::Bool(false)), Value::Bool(true));
}

#[test]
fn test_nan_compares_unequal() {
    let nan = || Value::Double(f64::NAN);
    assert_eq!(eval(nan(), BinaryOp::Eq, nan()), Value::Bool(false));
    assert_eq!(eval(nan(), BinaryOp::NotEq, nan()), Value::Bool(true));
    assert_eq!(eval(nan(), BinaryOp::Lt, Value::Double(1.0)), Value::Bool(false));
}

#[test]
fn test_mismatched_kinds() {
    assert_eq!(eval(Value::Int(1), BinaryOp::Eq, Value::Bool(true)), Value::Bool(false));
    assert_eq!(eval(Value::Char('1'), BinaryOp::NotEq, Value::Int(1)), Value::Bool(true));
    assert_eq!(eval_code(Value::Bool(true), BinaryOp::Lt, Value::Int(1)), ErrorCode::E3009);
    assert_eq!(
        eval_code(Value::Bool(true), BinaryOp::Add, Value::Bool(false)),
        ErrorCode::E3009
    );
}

#[test]
fn test_reference_identity() {
    let array = Value::array(ScriptType::Int, vec![Value::Int(1)]);
    let alias = array.clone();
    let copy = Value::array(ScriptType::Int, vec![Value::Int(1)]);
    assert_eq!(eval(array.clone(), BinaryOp::Eq, alias), Value::Bool(true));
    assert_eq!(eval(array, BinaryOp::Eq, copy), Value::Bool(false));
}
