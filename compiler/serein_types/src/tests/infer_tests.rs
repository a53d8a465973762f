use pretty_assertions::assert_eq;
use serein_ir::ScriptType;
use serein_runtime::Registries;

use super::{check, check_in, find, parse, var};
use crate::TypeAnalyzer;

#[test]
fn test_numeric_promotion() {
    let (program, table) = check("a = 1 + 2.0; b = \"a\" + 1; c = 1L * 2; d = 3 / 2; e = 1.5f - 1;");
    assert_eq!(var(&program, &table, "a"), ScriptType::Double);
    assert_eq!(var(&program, &table, "b"), ScriptType::String);
    assert_eq!(var(&program, &table, "c"), ScriptType::Long);
    assert_eq!(var(&program, &table, "d"), ScriptType::Int);
    assert_eq!(var(&program, &table, "e"), ScriptType::Float);
}

#[test]
fn test_assignment_chain_binds_first_type() {
    let (program, table) = check("x = 1; y = x; z = y;");
    assert_eq!(var(&program, &table, "z"), ScriptType::Int);
    assert_eq!(table.return_type(), &ScriptType::Void);
    assert_eq!(table.len(), program.arena().len());
}

#[test]
fn test_widening_assignment_keeps_bound_type() {
    let (program, table) = check("x = 1L; x = 2;");
    assert_eq!(var(&program, &table, "x"), ScriptType::Long);
}

#[test]
fn test_if_else_result() {
    let (_, table) = check("x = 0; if (x < 5) { x = 1; } else { x = 2; } return x;");
    assert_eq!(table.return_type(), &ScriptType::Int);
}

#[test]
fn test_agreeing_returns() {
    let (_, table) = check("if (true) { return 1; } else { return 2; }");
    assert_eq!(table.return_type(), &ScriptType::Int);
    let (_, table) = check("if (true) { return \"a\"; } return null;");
    assert_eq!(table.return_type(), &ScriptType::String);
    let (_, table) = check("return;");
    assert_eq!(table.return_type(), &ScriptType::Void);
}

#[test]
fn test_conditions_accept_comparisons_and_logic() {
    let (program, table) = check("i = 0; while (i < 10 && i != 7 || false) { i = i + 1; }");
    assert_eq!(table.type_of(find(&program, "BinaryOperation")), &ScriptType::Bool);
    assert_eq!(table.type_of(find(&program, "While")), &ScriptType::Void);
}

#[test]
fn test_array_literals_and_indexing() {
    let (program, table) = check(
        "v = [1, 2, 3][1]; a = [1, 2.5]; m = [1, \"a\"]; s = [\"a\", null]; n = [1, null]; e = [];",
    );
    assert_eq!(var(&program, &table, "v"), ScriptType::Int);
    assert_eq!(var(&program, &table, "a"), ScriptType::array(ScriptType::Double));
    assert_eq!(var(&program, &table, "m"), ScriptType::array(ScriptType::Object));
    assert_eq!(var(&program, &table, "s"), ScriptType::array(ScriptType::String));
    assert_eq!(var(&program, &table, "n"), ScriptType::array(ScriptType::Object));
    assert_eq!(var(&program, &table, "e"), ScriptType::array(ScriptType::Object));
}

#[test]
fn test_array_element_assignment() {
    let (program, table) = check("xs = [1, 2]; xs[0] = 5; n = xs.Length;");
    assert_eq!(
        table.type_of(find(&program, "CollectionIndex")),
        &ScriptType::Int
    );
    assert_eq!(var(&program, &table, "n"), ScriptType::Int);
}

#[test]
fn test_string_builtins() {
    let (program, table) = check(
        "s = \"abc\"; c = s[0]; n = s.Length; u = s.ToUpper(); h = s.Contains(\"b\"); t = s.Substring(1, 1); d = c.ToString();",
    );
    assert_eq!(var(&program, &table, "c"), ScriptType::Char);
    assert_eq!(var(&program, &table, "n"), ScriptType::Int);
    assert_eq!(var(&program, &table, "u"), ScriptType::String);
    assert_eq!(var(&program, &table, "h"), ScriptType::Bool);
    assert_eq!(var(&program, &table, "t"), ScriptType::String);
    assert_eq!(var(&program, &table, "d"), ScriptType::String);
}

#[test]
fn test_null_literal_into_reference_slot() {
    let (program, table) = check("s = \"a\"; s = null; xs = [1]; xs = null;");
    assert_eq!(var(&program, &table, "s"), ScriptType::String);
}

#[test]
fn test_object_operands_defer_checks() {
    let (program, table) = check("r = unknown + 1; b = unknown < 3; t = unknown + \"!\";");
    assert_eq!(var(&program, &table, "r"), ScriptType::Object);
    assert_eq!(var(&program, &table, "b"), ScriptType::Bool);
    assert_eq!(var(&program, &table, "t"), ScriptType::String);
}

#[test]
fn test_dynamic_access_on_object() {
    let (program, table) = check("n = 0; n = thing.Count; r = thing.Run(1); i = thing[2];");
    assert!(table.is_dynamic(find(&program, "MemberAccess")));
    assert!(table.is_dynamic(find(&program, "MemberFunctionCall")));
    assert!(table.is_dynamic(find(&program, "CollectionIndex")));
    assert_eq!(var(&program, &table, "n"), ScriptType::Int);
    assert_eq!(var(&program, &table, "r"), ScriptType::Object);
}

#[test]
fn test_params_seed_symbols() {
    let registries = Registries::new();
    let program = parse("return count * 2;");
    let table = TypeAnalyzer::new(&registries)
        .with_params([("count", ScriptType::Int)])
        .analyze(&program)
        .unwrap();
    assert_eq!(table.return_type(), &ScriptType::Int);
    assert_eq!(var(&program, &table, "count"), ScriptType::Int);
}

#[test]
fn test_analysis_is_idempotent() {
    let registries = Registries::new();
    let program = parse("class P { int X; } p = new P { X = 1 }; xs = [p.X, 2]; return xs[0] + 1.5;");
    let analyzer = TypeAnalyzer::new(&registries);
    let first = analyzer.analyze(&program).unwrap();
    let second = analyzer.analyze(&program).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.return_type(), &ScriptType::Double);
}

#[test]
fn test_record_declaration_and_use() {
    let registries = Registries::new();
    let (program, table) = check_in(
        "class Person { string Name; int Age; Person Parent; string[] Tags; }
         p = new Person { Name = \"Ann\", Age = 3 };
         p.Age = 4;
         p.Parent = null;
         n = p.Parent.Name;
         return p;",
        &registries,
    );
    assert_eq!(table.return_type(), &ScriptType::named("Person"));
    assert_eq!(var(&program, &table, "n"), ScriptType::String);
    let layout = registries.types.record("Person").unwrap();
    assert_eq!(
        layout.field("Tags").unwrap().ty,
        ScriptType::array(ScriptType::String)
    );
    assert_eq!(layout.field("Parent").unwrap().ty, ScriptType::named("Person"));
}

#[test]
fn test_record_redeclaration_keeps_first_layout() {
    let registries = Registries::new();
    check_in("class Point { int X; }", &registries);
    check_in("class Point { string Label; } p = new Point { X = 2 };", &registries);
    assert!(registries.types.record("Point").unwrap().field("Label").is_none());
}

#[test]
fn test_primitive_aliases_in_fields() {
    let registries = Registries::new();
    check_in(
        "class Sample { System.Int32 A; Int64 B; decimal C; System.String D; }",
        &registries,
    );
    let layout = registries.types.record("Sample").unwrap();
    let types: Vec<ScriptType> = layout.fields().iter().map(|f| f.ty.clone()).collect();
    assert_eq!(
        types,
        vec![
            ScriptType::Int,
            ScriptType::Long,
            ScriptType::Decimal,
            ScriptType::String
        ]
    );
}
