//! Node records.

use super::BinaryOp;
use crate::{FieldRange, Name, NodeId, NodeRange, Span, Spanned};

/// One AST node: a kind plus the span of the source that produced it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    #[inline]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }
}

impl Spanned for Node {
    fn span(&self) -> Span {
        self.span
    }
}

/// Node variants.
///
/// Statement and expression nodes share one enum: every statement can
/// appear where the grammar allows a statement, and expression statements
/// are just expressions in a statement list.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    // Literals
    Null,
    Char(char),
    String(Name),
    RawString(Name),
    Boolean(bool),
    Int(i32),
    Long(i64),
    /// `f32` bits.
    Float(u32),
    /// `f64` bits.
    Double(u64),

    /// Variable reference, resolved by name.
    Identifier(Name),

    /// `name = value`. `target` is always an `Identifier` node.
    Assignment { target: NodeId, value: NodeId },
    /// `object.member = value`.
    MemberAssignment {
        object: NodeId,
        member: Name,
        value: NodeId,
    },
    /// `collection[index] = value`. `index` is a `CollectionIndex` node.
    CollectionAssignment { index: NodeId, value: NodeId },

    Binary {
        left: NodeId,
        op: BinaryOp,
        right: NodeId,
    },

    If {
        condition: NodeId,
        then_branch: NodeRange,
        else_branch: NodeRange,
    },
    While { condition: NodeId, body: NodeRange },
    Return { value: Option<NodeId> },

    MemberAccess { object: NodeId, member: Name },
    MemberFunctionCall {
        object: NodeId,
        method: Name,
        args: NodeRange,
    },
    /// Call into the mounted function registry.
    FunctionCall { name: Name, args: NodeRange },
    CollectionIndex { collection: NodeId, index: NodeId },

    ArrayDefinition { elements: NodeRange },
    /// `new T(args) { Member = value, ... }`. `ty` is a `TypeNode`,
    /// `initializers` are `CtorAssignment` nodes.
    ObjectInstantiation {
        ty: NodeId,
        args: NodeRange,
        initializers: NodeRange,
    },
    /// One `Member = value` entry of an initializer block.
    CtorAssignment {
        class: NodeId,
        member: Name,
        value: NodeId,
    },

    /// `class Name { Type field; ... }`.
    ClassTypeDefinition { name: Name, fields: FieldRange },
    /// A type name as written, dotted and with an optional `[]` suffix.
    TypeNode { name: Name },

    /// `using a.b.c;`
    Using { namespace: Name },
}

impl NodeKind {
    /// Call nodes: not valid assignment targets, marked async by the analyzer.
    pub fn is_call(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionCall { .. } | NodeKind::MemberFunctionCall { .. }
        )
    }

    pub fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::Int(_) | NodeKind::Long(_) | NodeKind::Float(_) | NodeKind::Double(_)
        )
    }

    /// Short label for logging and debugging output.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Null => "Null",
            NodeKind::Char(_) => "Char",
            NodeKind::String(_) => "String",
            NodeKind::RawString(_) => "RawString",
            NodeKind::Boolean(_) => "Boolean",
            NodeKind::Int(_) => "Int",
            NodeKind::Long(_) => "Long",
            NodeKind::Float(_) => "Float",
            NodeKind::Double(_) => "Double",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::MemberAssignment { .. } => "MemberAssignment",
            NodeKind::CollectionAssignment { .. } => "CollectionAssignment",
            NodeKind::Binary { .. } => "BinaryOperation",
            NodeKind::If { .. } => "If",
            NodeKind::While { .. } => "While",
            NodeKind::Return { .. } => "Return",
            NodeKind::MemberAccess { .. } => "MemberAccess",
            NodeKind::MemberFunctionCall { .. } => "MemberFunctionCall",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::CollectionIndex { .. } => "CollectionIndex",
            NodeKind::ArrayDefinition { .. } => "ArrayDefinition",
            NodeKind::ObjectInstantiation { .. } => "ObjectInstantiation",
            NodeKind::CtorAssignment { .. } => "CtorAssignment",
            NodeKind::ClassTypeDefinition { .. } => "ClassTypeDefinition",
            NodeKind::TypeNode { .. } => "TypeNode",
            NodeKind::Using { .. } => "Using",
        }
    }
}

/// A field declared by a `class` statement. `ty` is a `TypeNode`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassField {
    pub name: Name,
    pub ty: NodeId,
    pub span: Span,
}
