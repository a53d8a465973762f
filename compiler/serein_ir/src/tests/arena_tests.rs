use crate::visitor::{walk_node, Visitor};
use crate::{
    BinaryOp, ClassField, NodeArena, NodeId, NodeKind, NodeRange, Program, SharedInterner, Span,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn sample_arena(interner: &SharedInterner) -> (NodeArena, NodeRange) {
    // x = 1 + 2; print(x);
    let mut arena = NodeArena::new();
    let x = interner.intern("x");
    let target = arena.alloc(NodeKind::Identifier(x), Span::new(0, 1));
    let one = arena.alloc(NodeKind::Int(1), Span::new(4, 5));
    let two = arena.alloc(NodeKind::Int(2), Span::new(8, 9));
    let sum = arena.alloc(
        NodeKind::Binary {
            left: one,
            op: BinaryOp::Add,
            right: two,
        },
        Span::new(4, 9),
    );
    let assign = arena.alloc(
        NodeKind::Assignment {
            target,
            value: sum,
        },
        Span::new(0, 10),
    );
    let arg = arena.alloc(NodeKind::Identifier(x), Span::new(17, 18));
    let args = arena.alloc_list([arg]);
    let call = arena.alloc(
        NodeKind::FunctionCall {
            name: interner.intern("print"),
            args,
        },
        Span::new(11, 20),
    );
    let statements = arena.alloc_list([assign, call]);
    (arena, statements)
}

#[test]
fn test_alloc_and_get() {
    let interner = SharedInterner::new();
    let (arena, statements) = sample_arena(&interner);
    assert_eq!(arena.len(), 7);
    assert_eq!(statements.len(), 2);
    assert_eq!(arena.kind(NodeId::new(1)), &NodeKind::Int(1));
    assert_eq!(arena.span(NodeId::new(3)), Span::new(4, 9));
    assert!(arena.kind(NodeId::new(6)).is_call());
}

#[test]
fn test_fields() {
    let interner = SharedInterner::new();
    let mut arena = NodeArena::new();
    let ty = arena.alloc(
        NodeKind::TypeNode {
            name: interner.intern("int"),
        },
        Span::DUMMY,
    );
    let fields = arena.alloc_fields([ClassField {
        name: interner.intern("Age"),
        ty,
        span: Span::DUMMY,
    }]);
    assert_eq!(fields.len(), 1);
    assert_eq!(interner.lookup(arena.get_fields(fields)[0].name), "Age");
}

#[test]
fn test_program_locates_nodes() {
    let interner = SharedInterner::new();
    let (arena, statements) = sample_arena(&interner);
    let program = Program::new(
        arena,
        statements,
        Arc::from("x = 1 + 2;\nprint(x);"),
        interner,
    );
    let call = program.statements()[1];
    let loc = program.locate_node(call);
    assert_eq!(loc.row, 2);
    assert_eq!(loc.line_text, "print(x);");
}

#[test]
fn test_visitor_walks_in_source_order() {
    struct Collect(Vec<&'static str>);

    impl Visitor for Collect {
        fn visit_node(&mut self, id: NodeId, arena: &NodeArena) {
            self.0.push(arena.kind(id).label());
            walk_node(self, id, arena);
        }
    }

    let interner = SharedInterner::new();
    let (arena, statements) = sample_arena(&interner);
    let mut collect = Collect(Vec::new());
    collect.visit_list(statements, &arena);
    assert_eq!(
        collect.0,
        vec![
            "Assignment",
            "Identifier",
            "BinaryOperation",
            "Int",
            "Int",
            "FunctionCall",
            "Identifier",
        ]
    );
}
