use pretty_assertions::assert_eq;
use serein_diagnostic::ErrorCode;
use serein_ir::ScriptType;
use serein_runtime::{Registries, Value};

use super::{run, run_err, Compiled};
use crate::InvocationContext;

#[tokio::test]
async fn test_promotion_through_variables() {
    assert_eq!(run("x = 1; y = 2L; return x + y;").await, Value::Long(3));
    assert_eq!(run("x = 1L; x = 2; return x;").await, Value::Long(2));
    assert_eq!(run("return 3 / 2 * 1.5;").await, Value::Double(1.5));
}

#[tokio::test]
async fn test_assignment_chain() {
    assert_eq!(run("a = \"s\"; b = a; c = b; return c + 1;").await, Value::string("s1"));
}

#[tokio::test]
async fn test_if_else() {
    let source = "x = 7; if (x < 5) { r = \"small\"; } else if (x < 10) { r = \"medium\"; } else { r = \"large\"; } return r;";
    assert_eq!(run(source).await, Value::string("medium"));
}

#[tokio::test]
async fn test_while_accumulates() {
    let source = "i = 0; sum = 0; while (i < 5) { i = i + 1; sum = sum + i; } return sum;";
    assert_eq!(run(source).await, Value::Int(15));
}

#[tokio::test]
async fn test_return_inside_loop_stops_everything() {
    let source = "i = 0; while (true) { i = i + 1; if (i == 3) { return i * 10; } } return 0;";
    assert_eq!(run(source).await, Value::Int(30));
}

#[tokio::test]
async fn test_return_skips_remaining_statements() {
    let compiled = Compiled::new("x = 1; return x; x = 2;", Registries::new(), &[]);
    let mut ctx = InvocationContext::new();
    assert_eq!(compiled.run(&mut ctx).await.unwrap(), Value::Int(1));
    assert_eq!(ctx.get("x"), Value::Int(1));
}

#[tokio::test]
async fn test_empty_body_and_false_condition_end_loops() {
    assert_eq!(run("while (true) { } return 1;").await, Value::Int(1));
    assert_eq!(run("n = 0; while (false) { n = 1; } return n;").await, Value::Int(0));
}

#[tokio::test]
async fn test_last_statement_value_without_return() {
    assert_eq!(run("x = 2; x * 21;").await, Value::Int(42));
    assert_eq!(run("x = 2;").await, Value::Null);
}

#[tokio::test]
async fn test_logical_operators_short_circuit() {
    assert_eq!(run("z = 0; return false && 1 / z == 1;").await, Value::Bool(false));
    assert_eq!(run("z = 0; return true || 1 / z == 1;").await, Value::Bool(true));
    assert_eq!(run("return true && 1 < 2;").await, Value::Bool(true));
}

#[tokio::test]
async fn test_non_bool_condition_at_run_time() {
    let compiled = Compiled::new(
        "if (flag) { return 1; } return 2;",
        Registries::new(),
        &[("flag", ScriptType::Object)],
    );

    let mut ctx = InvocationContext::new().with_arg("flag", Value::Bool(true));
    assert_eq!(compiled.run(&mut ctx).await.unwrap(), Value::Int(1));

    let mut ctx = InvocationContext::new().with_arg("flag", Value::Int(1));
    let err = compiled.run(&mut ctx).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3003);
}

#[tokio::test]
async fn test_runtime_errors_carry_the_failing_line() {
    let compiled = Compiled::new("a = 0;\nb = 1;\nc = b / a;\n", Registries::new(), &[]);
    let err = compiled.run(&mut InvocationContext::new()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3002);
    assert_eq!(compiled.row_of(&err), 3);
    let diagnostic = err.to_diagnostic(&compiled.program);
    assert!(diagnostic.render().contains("c = b / a;"));
}

#[tokio::test]
async fn test_null_operand() {
    assert_eq!(run_err("s = null; return s + 1;").await.code(), ErrorCode::E3001);
}

#[tokio::test]
async fn test_deep_expression_chain() {
    let mut source = String::from("return 1");
    for _ in 0..1999 {
        source.push_str(" + 1");
    }
    source.push(';');
    assert_eq!(run(&source).await, Value::Int(2000));
}

#[tokio::test]
async fn test_context_reused_across_runs() {
    let compiled = Compiled::new(
        "n = n + 1; return n;",
        Registries::new(),
        &[("n", ScriptType::Int)],
    );
    let mut ctx = InvocationContext::new().with_arg("n", Value::Int(0));
    assert_eq!(compiled.run(&mut ctx).await.unwrap(), Value::Int(1));
    assert_eq!(compiled.run(&mut ctx).await.unwrap(), Value::Int(2));
}
