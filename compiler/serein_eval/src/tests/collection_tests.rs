use pretty_assertions::assert_eq;
use serein_diagnostic::ErrorCode;
use serein_ir::ScriptType;
use serein_runtime::{MapKey, Registries, Value};

use super::{run, run_err, Compiled};
use crate::InvocationContext;

#[tokio::test]
async fn test_array_read_write() {
    assert_eq!(
        run("a = [1, 2, 3]; a[1] = 5; return a[1] + a.Length;").await,
        Value::Int(8)
    );
    assert_eq!(run("return [10, 20, 30][2];").await, Value::Int(30));
}

#[tokio::test]
async fn test_arrays_alias() {
    assert_eq!(run("a = [1, 2]; b = a; b[0] = 9; return a[0];").await, Value::Int(9));
}

#[tokio::test]
async fn test_array_elements_take_the_literal_type() {
    assert_eq!(run("a = [1, 2L]; return a[0];").await, Value::Long(1));
    let mixed = run("return [1, \"a\"];").await;
    let Value::Array(array) = mixed else {
        panic!("expected an array, got {mixed:?}");
    };
    assert_eq!(array.element(), &ScriptType::Object);
    assert_eq!(array.len(), 2);
}

#[tokio::test]
async fn test_element_assignment_widens() {
    assert_eq!(run("a = [1L, 2L]; a[0] = 7; return a[0];").await, Value::Long(7));
}

#[tokio::test]
async fn test_index_out_of_range() {
    assert_eq!(run_err("a = [1]; return a[3];").await.code(), ErrorCode::E3008);
    assert_eq!(run_err("a = [1]; a[-1] = 2;").await.code(), ErrorCode::E3008);
}

#[tokio::test]
async fn test_string_members() {
    assert_eq!(run("s = \"abc\"; return s[1];").await, Value::Char('b'));
    assert_eq!(run("return \"  Hi \".Trim().ToUpper();").await, Value::string("HI"));
    assert_eq!(run("s = \"hello\"; return s.Substring(1, 3);").await, Value::string("ell"));
    assert_eq!(run("return \"hello\".Contains(\"ll\");").await, Value::Bool(true));
    assert_eq!(run("return \"héllo\".Length;").await, Value::Int(5));
    assert_eq!(
        run_err("return \"abc\".Substring(2, 5);").await.code(),
        ErrorCode::E3008
    );
}

#[tokio::test]
async fn test_to_string_everywhere() {
    assert_eq!(run("x = 42; return x.ToString() + \"!\";").await, Value::string("42!"));
    assert_eq!(run("b = true; return b.ToString();").await, Value::string("True"));
    assert_eq!(run("return [1, 2].ToString();").await, Value::string("[1, 2]"));
}

#[tokio::test]
async fn test_to_string_of_self_containing_array() {
    assert_eq!(
        run("a = [1, \"x\"]; a[0] = a; return a.ToString();").await,
        Value::string("[[...], x]")
    );
}

#[tokio::test]
async fn test_list_parameter() {
    let compiled = Compiled::new(
        "items.Add(1); items.Add(2); items[0] = 5; return items.Count + items[0];",
        Registries::new(),
        &[("items", ScriptType::list(ScriptType::Long))],
    );
    let list = Value::list(ScriptType::Long, Vec::new());
    let mut ctx = InvocationContext::new().with_arg("items", list.clone());
    assert_eq!(compiled.run(&mut ctx).await.unwrap(), Value::Long(7));

    let Value::List(list) = list else {
        unreachable!()
    };
    assert_eq!(*list.read(), vec![Value::Long(5), Value::Long(2)]);
}

#[tokio::test]
async fn test_dictionary_parameter() {
    let compiled = Compiled::new(
        "m[\"a\"] = 1; m[\"b\"] = m[\"a\"] + 1; m.Remove(\"a\"); return m.ContainsKey(\"b\") && m.Count == 1;",
        Registries::new(),
        &[("m", ScriptType::dictionary(ScriptType::String, ScriptType::Int))],
    );
    let map = Value::map(ScriptType::String, ScriptType::Int, []);
    let mut ctx = InvocationContext::new().with_arg("m", map.clone());
    assert_eq!(compiled.run(&mut ctx).await.unwrap(), Value::Bool(true));

    let Value::Map(map) = map else {
        unreachable!()
    };
    assert_eq!(map.get(&MapKey::Str("b".into())), Some(Value::Int(2)));
}

#[tokio::test]
async fn test_missing_dictionary_key() {
    let compiled = Compiled::new(
        "return m[\"missing\"];",
        Registries::new(),
        &[("m", ScriptType::dictionary(ScriptType::String, ScriptType::Int))],
    );
    let mut ctx = InvocationContext::new()
        .with_arg("m", Value::map(ScriptType::String, ScriptType::Int, []));
    let err = compiled.run(&mut ctx).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3008);
}
