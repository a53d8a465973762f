use super::{kind, only_statement, parse_ok, parse_with_limit};
use pretty_assertions::assert_eq;
use serein_ir::{BinaryOp, NodeKind};

#[test]
fn test_assignment_statement() {
    let program = parse_ok("x = 5;");
    let stmt = only_statement(&program);
    let NodeKind::Assignment { target, value } = *kind(&program, stmt) else {
        panic!("expected assignment, got {:?}", kind(&program, stmt));
    };
    let NodeKind::Identifier(name) = *kind(&program, target) else {
        panic!("expected identifier target");
    };
    assert_eq!(program.name(name), "x");
    assert_eq!(kind(&program, value), &NodeKind::Int(5));
}

#[test]
fn test_let_prefix_is_ignored() {
    let kinds = |program: &serein_ir::Program| -> Vec<NodeKind> {
        program.arena().ids().map(|id| kind(program, id).clone()).collect()
    };
    let with_let = parse_ok("let x = 1;");
    let without = parse_ok("x = 1;");
    assert_eq!(kinds(&with_let), kinds(&without));
}

#[test]
fn test_bare_let_declaration_is_expression_statement() {
    let program = parse_ok("let x; x = 5; return x;");
    let stmts = program.statements();
    assert_eq!(stmts.len(), 3);
    assert!(matches!(kind(&program, stmts[0]), NodeKind::Identifier(_)));
    assert!(matches!(kind(&program, stmts[1]), NodeKind::Assignment { .. }));
    assert!(matches!(kind(&program, stmts[2]), NodeKind::Return { value: Some(_) }));
}

#[test]
fn test_expression_statement_call() {
    let program = parse_ok("print(\"hi\");");
    let stmt = only_statement(&program);
    let NodeKind::FunctionCall { name, args } = *kind(&program, stmt) else {
        panic!("expected call");
    };
    assert_eq!(program.name(name), "print");
    assert_eq!(args.len(), 1);
}

#[test]
fn test_member_assignment() {
    let program = parse_ok("p.Address.City = \"Oslo\";");
    let stmt = only_statement(&program);
    let NodeKind::MemberAssignment { object, member, .. } = *kind(&program, stmt) else {
        panic!("expected member assignment");
    };
    assert_eq!(program.name(member), "City");
    assert!(matches!(kind(&program, object), NodeKind::MemberAccess { .. }));
}

#[test]
fn test_collection_assignment() {
    let program = parse_ok("arr[0] = 9;");
    let stmt = only_statement(&program);
    let NodeKind::CollectionAssignment { index, value } = *kind(&program, stmt) else {
        panic!("expected collection assignment");
    };
    assert!(matches!(kind(&program, index), NodeKind::CollectionIndex { .. }));
    assert_eq!(kind(&program, value), &NodeKind::Int(9));
}

#[test]
fn test_assignment_with_nested_equals_in_initializer() {
    let program = parse_ok("p = new Person { Name = \"a\", Age = 3 };");
    let stmt = only_statement(&program);
    let NodeKind::Assignment { value, .. } = *kind(&program, stmt) else {
        panic!("expected assignment");
    };
    let NodeKind::ObjectInstantiation { args, initializers, .. } = *kind(&program, value) else {
        panic!("expected instantiation");
    };
    assert!(args.is_empty());
    assert_eq!(initializers.len(), 2);
}

#[test]
fn test_equals_inside_call_is_not_assignment() {
    let program = parse_ok("register(new Person { Name = \"a\" });");
    let stmt = only_statement(&program);
    assert!(matches!(kind(&program, stmt), NodeKind::FunctionCall { .. }));
}

#[test]
fn test_if_else() {
    let program = parse_ok("if (1 > 0) { return 1; } else { return 2; }");
    let stmt = only_statement(&program);
    let NodeKind::If {
        condition,
        then_branch,
        else_branch,
    } = *kind(&program, stmt)
    else {
        panic!("expected if");
    };
    assert!(matches!(
        kind(&program, condition),
        NodeKind::Binary { op: BinaryOp::Gt, .. }
    ));
    assert_eq!(then_branch.len(), 1);
    assert_eq!(else_branch.len(), 1);
}

#[test]
fn test_else_if_chain() {
    let program = parse_ok("if (a) { x = 1; } else if (b) { x = 2; } else { x = 3; }");
    let stmt = only_statement(&program);
    let NodeKind::If { else_branch, .. } = *kind(&program, stmt) else {
        panic!("expected if");
    };
    let nested = program.arena().get_list(else_branch);
    assert_eq!(nested.len(), 1);
    let NodeKind::If { else_branch, .. } = *kind(&program, nested[0]) else {
        panic!("expected nested if");
    };
    assert_eq!(else_branch.len(), 1);
}

#[test]
fn test_if_without_else() {
    let program = parse_ok("if (ok) { x = 1; }");
    let NodeKind::If { else_branch, .. } = *kind(&program, only_statement(&program)) else {
        panic!("expected if");
    };
    assert!(else_branch.is_empty());
}

#[test]
fn test_while() {
    let program = parse_ok("i = 0; while (i < 10) { i = i + 1; }");
    let stmts = program.statements();
    let NodeKind::While { body, .. } = *kind(&program, stmts[1]) else {
        panic!("expected while");
    };
    assert_eq!(body.len(), 1);
}

#[test]
fn test_empty_while_body() {
    let program = parse_ok("while (false) { }");
    let NodeKind::While { body, .. } = *kind(&program, only_statement(&program)) else {
        panic!("expected while");
    };
    assert!(body.is_empty());
}

#[test]
fn test_bare_return() {
    let program = parse_ok("return;");
    assert_eq!(
        kind(&program, only_statement(&program)),
        &NodeKind::Return { value: None }
    );
}

#[test]
fn test_empty_statements_are_dropped() {
    let program = parse_ok(";; x = 1;;");
    assert_eq!(program.statements().len(), 1);
}

#[test]
fn test_using() {
    let program = parse_ok("using System.Collections.Generic;");
    let NodeKind::Using { namespace } = *kind(&program, only_statement(&program)) else {
        panic!("expected using");
    };
    assert_eq!(program.name(namespace), "System.Collections.Generic");
}

#[test]
fn test_class_definition() {
    let program = parse_ok("class Person { string Name; System.Int32 Age; string[] Tags; }");
    let NodeKind::ClassTypeDefinition { name, fields } = *kind(&program, only_statement(&program))
    else {
        panic!("expected class");
    };
    assert_eq!(program.name(name), "Person");
    let fields = program.arena().get_fields(fields);
    let described: Vec<(String, String)> = fields
        .iter()
        .map(|f| {
            let NodeKind::TypeNode { name: ty } = *kind(&program, f.ty) else {
                panic!("expected type node");
            };
            (program.name(f.name).to_owned(), program.name(ty).to_owned())
        })
        .collect();
    assert_eq!(
        described,
        vec![
            ("Name".to_owned(), "string".to_owned()),
            ("Age".to_owned(), "System.Int32".to_owned()),
            ("Tags".to_owned(), "string[]".to_owned()),
        ]
    );
}

#[test]
fn test_statement_rows() {
    let program = parse_ok("a = 1;\n\nb = a + 1;\nreturn b;");
    let rows: Vec<u32> = program
        .statements()
        .iter()
        .map(|&id| program.locate_node(id).row)
        .collect();
    assert_eq!(rows, vec![1, 3, 4]);
}

#[test]
fn test_lookahead_limit_applies() {
    let long_call = format!("f({});", vec!["1"; 50].join(", "));
    assert!(parse_with_limit(&long_call, 200).is_ok());
    let err = parse_with_limit(&long_call, 10).unwrap_err();
    assert_eq!(err.code, serein_diagnostic::ErrorCode::E1005);
}
