//! AST visitor.
//!
//! Generic read-only traversal of the node arena. Override `visit_node` to
//! act on specific kinds and call `walk_node` to continue into children.
//!
//! ```text
//! struct CountCalls { count: usize }
//!
//! impl Visitor for CountCalls {
//!     fn visit_node(&mut self, id: NodeId, arena: &NodeArena) {
//!         if arena.kind(id).is_call() {
//!             self.count += 1;
//!         }
//!         walk_node(self, id, arena);
//!     }
//! }
//! ```

use crate::{NodeArena, NodeId, NodeKind, NodeRange};

pub trait Visitor {
    fn visit_node(&mut self, id: NodeId, arena: &NodeArena) {
        walk_node(self, id, arena);
    }

    fn visit_list(&mut self, range: NodeRange, arena: &NodeArena) {
        for &id in arena.get_list(range) {
            self.visit_node(id, arena);
        }
    }
}

/// Visit the children of `id` in source order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, id: NodeId, arena: &NodeArena) {
    match *arena.kind(id) {
        NodeKind::Null
        | NodeKind::Char(_)
        | NodeKind::String(_)
        | NodeKind::RawString(_)
        | NodeKind::Boolean(_)
        | NodeKind::Int(_)
        | NodeKind::Long(_)
        | NodeKind::Float(_)
        | NodeKind::Double(_)
        | NodeKind::Identifier(_)
        | NodeKind::TypeNode { .. }
        | NodeKind::Using { .. } => {}

        NodeKind::Assignment { target, value } => {
            visitor.visit_node(target, arena);
            visitor.visit_node(value, arena);
        }
        NodeKind::MemberAssignment { object, value, .. } => {
            visitor.visit_node(object, arena);
            visitor.visit_node(value, arena);
        }
        NodeKind::CollectionAssignment { index, value } => {
            visitor.visit_node(index, arena);
            visitor.visit_node(value, arena);
        }
        NodeKind::Binary { left, right, .. } => {
            visitor.visit_node(left, arena);
            visitor.visit_node(right, arena);
        }
        NodeKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_node(condition, arena);
            visitor.visit_list(then_branch, arena);
            visitor.visit_list(else_branch, arena);
        }
        NodeKind::While { condition, body } => {
            visitor.visit_node(condition, arena);
            visitor.visit_list(body, arena);
        }
        NodeKind::Return { value } => {
            if let Some(value) = value {
                visitor.visit_node(value, arena);
            }
        }
        NodeKind::MemberAccess { object, .. } => visitor.visit_node(object, arena),
        NodeKind::MemberFunctionCall { object, args, .. } => {
            visitor.visit_node(object, arena);
            visitor.visit_list(args, arena);
        }
        NodeKind::FunctionCall { args, .. } => visitor.visit_list(args, arena),
        NodeKind::CollectionIndex { collection, index } => {
            visitor.visit_node(collection, arena);
            visitor.visit_node(index, arena);
        }
        NodeKind::ArrayDefinition { elements } => visitor.visit_list(elements, arena),
        NodeKind::ObjectInstantiation {
            ty,
            args,
            initializers,
        } => {
            visitor.visit_node(ty, arena);
            visitor.visit_list(args, arena);
            visitor.visit_list(initializers, arena);
        }
        NodeKind::CtorAssignment { class, value, .. } => {
            visitor.visit_node(class, arena);
            visitor.visit_node(value, arena);
        }
        NodeKind::ClassTypeDefinition { fields, .. } => {
            for field in arena.get_fields(fields) {
                visitor.visit_node(field.ty, arena);
            }
        }
    }
}
