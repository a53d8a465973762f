use super::{kind, only_statement, parse_ok};
use pretty_assertions::assert_eq;
use serein_ir::{BinaryOp, NodeId, NodeKind, Program};

/// Render an expression back to a fully parenthesized string.
fn render(program: &Program, id: NodeId) -> String {
    match *kind(program, id) {
        NodeKind::Int(v) => v.to_string(),
        NodeKind::Long(v) => format!("{v}L"),
        NodeKind::Double(bits) => format!("{:?}", f64::from_bits(bits)),
        NodeKind::Float(bits) => format!("{:?}f", f32::from_bits(bits)),
        NodeKind::Boolean(b) => b.to_string(),
        NodeKind::Null => "null".to_owned(),
        NodeKind::String(s) => format!("{:?}", program.name(s)),
        NodeKind::Identifier(n) => program.name(n).to_owned(),
        NodeKind::Binary { left, op, right } => format!(
            "({} {} {})",
            render(program, left),
            op.as_symbol(),
            render(program, right)
        ),
        NodeKind::MemberAccess { object, member } => {
            format!("{}.{}", render(program, object), program.name(member))
        }
        NodeKind::MemberFunctionCall { object, method, args } => format!(
            "{}.{}({})",
            render(program, object),
            program.name(method),
            render_list(program, program.arena().get_list(args))
        ),
        NodeKind::FunctionCall { name, args } => format!(
            "{}({})",
            program.name(name),
            render_list(program, program.arena().get_list(args))
        ),
        NodeKind::CollectionIndex { collection, index } => {
            format!("{}[{}]", render(program, collection), render(program, index))
        }
        NodeKind::ArrayDefinition { elements } => {
            format!("[{}]", render_list(program, program.arena().get_list(elements)))
        }
        ref other => other.label().to_owned(),
    }
}

fn render_list(program: &Program, ids: &[NodeId]) -> String {
    ids.iter()
        .map(|&id| render(program, id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_expr(source: &str) -> String {
    let program = parse_ok(source);
    let stmt = only_statement(&program);
    render(&program, stmt)
}

#[test]
fn test_precedence() {
    assert_eq!(render_expr("1 + 2 * 3;"), "(1 + (2 * 3))");
    assert_eq!(render_expr("(1 + 2) * 3;"), "((1 + 2) * 3)");
    assert_eq!(render_expr("a < b + 1 && c == d;"), "((a < (b + 1)) && (c == d))");
    assert_eq!(render_expr("a || b && c;"), "((a || b) && c)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(render_expr("1 - 2 - 3;"), "((1 - 2) - 3)");
    assert_eq!(render_expr("8 / 4 / 2;"), "((8 / 4) / 2)");
}

#[test]
fn test_negative_literals() {
    assert_eq!(render_expr("-5;"), "-5");
    assert_eq!(render_expr("x - -5;"), "(x - -5)");
    assert_eq!(render_expr("-1.5;"), "-1.5");
    assert_eq!(render_expr("-2147483648;"), "-2147483648");
    assert_eq!(render_expr("-9000000000;"), "-9000000000L");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(
        render_expr("a.b.c(1, x)[2].d;"),
        "a.b.c(1, x)[2].d"
    );
}

#[test]
fn test_array_literal_index() {
    assert_eq!(render_expr("[1, 2, 3][1];"), "[1, 2, 3][1]");
    assert_eq!(render_expr("[1, 2,];"), "[1, 2]");
    assert_eq!(render_expr("[];"), "[]");
}

#[test]
fn test_parenthesized_postfix() {
    assert_eq!(render_expr("(a + b).ToString();"), "(a + b).ToString()");
}

#[test]
fn test_string_literal_member() {
    assert_eq!(render_expr("\"abc\".Length;"), "\"abc\".Length");
}

#[test]
fn test_object_instantiation() {
    let program = parse_ok("new Point(1, 2) { Label = \"p\" };");
    let stmt = only_statement(&program);
    let NodeKind::ObjectInstantiation {
        ty,
        args,
        initializers,
    } = *kind(&program, stmt)
    else {
        panic!("expected instantiation");
    };
    let NodeKind::TypeNode { name } = *kind(&program, ty) else {
        panic!("expected type node");
    };
    assert_eq!(program.name(name), "Point");
    assert_eq!(args.len(), 2);
    let init = program.arena().get_list(initializers)[0];
    let NodeKind::CtorAssignment { class, member, .. } = *kind(&program, init) else {
        panic!("expected ctor assignment");
    };
    assert_eq!(class, ty);
    assert_eq!(program.name(member), "Label");
}

#[test]
fn test_instantiation_without_parens() {
    let program = parse_ok("new Person { Name = \"x\", };");
    let NodeKind::ObjectInstantiation { initializers, .. } = *kind(&program, only_statement(&program))
    else {
        panic!("expected instantiation");
    };
    assert_eq!(initializers.len(), 1);
}

#[test]
fn test_qualified_instantiation() {
    let program = parse_ok("new System.Text.StringBuilder();");
    let NodeKind::ObjectInstantiation { ty, .. } = *kind(&program, only_statement(&program)) else {
        panic!("expected instantiation");
    };
    let NodeKind::TypeNode { name } = *kind(&program, ty) else {
        panic!("expected type node");
    };
    assert_eq!(program.name(name), "System.Text.StringBuilder");
}

#[test]
fn test_literal_kinds() {
    let program = parse_ok("x = [null, true, 'c', \"s\", \"\"\"raw\"\"\", 1, 2L, 1.5f, 2.5];");
    let NodeKind::Assignment { value, .. } = *kind(&program, only_statement(&program)) else {
        panic!("expected assignment");
    };
    let NodeKind::ArrayDefinition { elements } = *kind(&program, value) else {
        panic!("expected array");
    };
    let labels: Vec<&str> = program
        .arena()
        .get_list(elements)
        .iter()
        .map(|&id| kind(&program, id).label())
        .collect();
    assert_eq!(
        labels,
        vec!["Null", "Boolean", "Char", "String", "RawString", "Int", "Long", "Float", "Double"]
    );
}

#[test]
fn test_binary_ops_all_levels() {
    let program = parse_ok("a + b - c * d / e == f != g < h <= i > j >= k && l || m;");
    let mut ops = Vec::new();
    for id in program.arena().ids() {
        if let NodeKind::Binary { op, .. } = *kind(&program, id) {
            ops.push(op);
        }
    }
    assert_eq!(ops.len(), 12);
    assert!(ops.contains(&BinaryOp::Or));
    assert!(ops.contains(&BinaryOp::GtEq));
}

#[test]
fn test_deeply_nested_parentheses() {
    let depth = 2000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let program = parse_ok(&source);
    assert_eq!(program.statements().len(), 1);
}
