use pretty_assertions::assert_eq;
use serein_diagnostic::ErrorCode;
use serein_ir::ScriptType;
use serein_runtime::Registries;

use super::{check_err, check_err_in, check_in, var};

#[test]
fn test_error_codes() {
    let cases = [
        ("x = 1; x = \"a\";", ErrorCode::E2001),
        ("x = 1; x = 2L;", ErrorCode::E2001),
        ("x = true + 1;", ErrorCode::E2002),
        ("x = 1 == \"a\";", ErrorCode::E2002),
        ("x = true < false;", ErrorCode::E2002),
        ("x = 1 && true;", ErrorCode::E2002),
        ("if (1) { }", ErrorCode::E2003),
        ("while (\"yes\") { }", ErrorCode::E2003),
        ("s = \"a\"; n = s.Size;", ErrorCode::E2004),
        ("s = \"a\"; s.Explode();", ErrorCode::E2005),
        ("s = \"a\"; s.Substring(\"1\");", ErrorCode::E2005),
        ("b = true; c = b[0];", ErrorCode::E2006),
        ("xs = [1]; c = xs[\"0\"];", ErrorCode::E2006),
        ("p = new Ghost();", ErrorCode::E2007),
        ("class Box { Ghost Inner; }", ErrorCode::E2007),
        ("if (true) { return 1; } return \"a\";", ErrorCode::E2008),
        ("if (true) { return 1; } return null;", ErrorCode::E2008),
        ("if (true) { return 1; } return;", ErrorCode::E2008),
        ("unknown(1);", ErrorCode::E2009),
        ("class P { int X; } p = new P(1);", ErrorCode::E2010),
        ("x = new int();", ErrorCode::E2010),
        ("s = \"a\"; n = 0; s.Length = n;", ErrorCode::E2011),
        ("s = \"abc\"; s[0] = 'x';", ErrorCode::E2011),
    ];
    for (source, code) in cases {
        let err = check_err(source);
        assert_eq!(err.code, code, "{source}: {}", err.message);
    }
}

#[test]
fn test_error_carries_row_and_line() {
    let err = check_err("a = 1;\nb = \"x\";\nc = a * b;\nreturn c;");
    assert_eq!(err.code, ErrorCode::E2002);
    assert_eq!(err.row(), 3);
    assert_eq!(err.line_text(), "c = a * b;");
    assert_eq!(err.message, "operator `*` cannot be applied to `int` and `string`");
    assert_eq!(
        err.to_string(),
        "operator `*` cannot be applied to `int` and `string` at line 3"
    );
}

#[test]
fn test_inconsistent_returns_message() {
    let err = check_err("if (true) {\n  return 1;\n}\nreturn \"a\";");
    assert_eq!(
        err.message,
        "inconsistent return types across branches: `int` and `string`"
    );
    assert_eq!(err.row(), 4);
}

#[test]
fn test_unknown_member_names_it() {
    let registries = Registries::new();
    let err = check_err_in(
        "class Person { string Name; } p = new Person { Nmae = \"a\" };",
        &registries,
    );
    assert_eq!(err.code, ErrorCode::E2004);
    assert_eq!(err.message, "type `Person` has no member `Nmae`");
}

#[test]
fn test_failure_does_not_affect_later_analysis() {
    let registries = Registries::new();
    let err = check_err_in("x = 1; x = \"a\";", &registries);
    assert_eq!(err.code, ErrorCode::E2001);
    let (program, table) = check_in("x = \"a\";", &registries);
    assert_eq!(var(&program, &table, "x"), ScriptType::String);
}

#[test]
fn test_diagnostic_conversion() {
    let err = check_err("\n\nif (2) { }");
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E2003);
    assert_eq!(err.row(), 3);
}
