//! Declaration collection.
//!
//! One pass over the program gathers everything that is emitted ahead of
//! the statements: `using` directives, record classes and the locals the
//! method body declares.

use rustc_hash::FxHashSet;
use serein_ir::visitor::{walk_node, Visitor};
use serein_ir::{Name, NodeArena, NodeId, NodeKind, Program};

/// What the generated unit declares, each list in first-occurrence order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Namespaces from `using` statements, without duplicates.
    pub usings: Vec<Name>,
    /// `ClassTypeDefinition` nodes, one per class name.
    pub records: Vec<NodeId>,
    /// Free identifiers and the node each first appears at.
    pub locals: Vec<(Name, NodeId)>,
}

impl Declarations {
    /// Collect declarations, leaving out identifiers named in `params`.
    pub fn collect(program: &Program, params: &[&str]) -> Self {
        let mut collector = Collector {
            program,
            params,
            decls: Declarations::default(),
            seen_usings: FxHashSet::default(),
            seen_records: FxHashSet::default(),
            seen_locals: FxHashSet::default(),
        };
        for &stmt in program.statements() {
            collector.visit_node(stmt, program.arena());
        }
        collector.decls
    }
}

struct Collector<'a> {
    program: &'a Program,
    params: &'a [&'a str],
    decls: Declarations,
    seen_usings: FxHashSet<Name>,
    seen_records: FxHashSet<Name>,
    seen_locals: FxHashSet<Name>,
}

impl Visitor for Collector<'_> {
    fn visit_node(&mut self, id: NodeId, arena: &NodeArena) {
        match *arena.kind(id) {
            NodeKind::Identifier(name) => {
                if self.seen_locals.insert(name)
                    && !self.params.contains(&self.program.name(name))
                {
                    self.decls.locals.push((name, id));
                }
            }
            NodeKind::Using { namespace } => {
                if self.seen_usings.insert(namespace) {
                    self.decls.usings.push(namespace);
                }
            }
            NodeKind::ClassTypeDefinition { name, .. } => {
                if self.seen_records.insert(name) {
                    self.decls.records.push(id);
                }
            }
            _ => {}
        }
        walk_node(self, id, arena);
    }
}
