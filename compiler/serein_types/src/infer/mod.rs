//! Node type inference.
//!
//! `Checker::infer` dispatches on `NodeKind`; each category lives in its
//! own module:
//!
//! - Literals and identifiers: here
//! - Operators: `operators`
//! - Members, method and function calls: `members`
//! - Indexing and array literals: `collections`
//! - `if`, `while`, `return`: `control_flow`
//! - Type names, `new`, `class`, `using`: `type_resolution`

mod collections;
mod control_flow;
mod members;
mod operators;
mod type_resolution;

use rustc_hash::FxHashMap;
use serein_diagnostic::ErrorCode;
use serein_ir::{Name, NodeId, NodeKind, NodeRange, Program, ScriptType, Span};
use serein_runtime::Registries;
use serein_stack::ensure_sufficient_stack;

use crate::{NodeFlags, TypeError, TypeTable};

/// A `return` seen during the pass.
struct ReturnSite {
    ty: ScriptType,
    null_literal: bool,
    span: Span,
}

/// Mutable state of one analysis.
pub(crate) struct Checker<'a> {
    program: &'a Program,
    registries: &'a Registries,
    types: Vec<ScriptType>,
    flags: Vec<NodeFlags>,
    variables: FxHashMap<Name, ScriptType>,
    usings: Vec<&'static str>,
    returns: Vec<ReturnSite>,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(program: &'a Program, registries: &'a Registries) -> Self {
        let len = program.arena().len();
        Checker {
            program,
            registries,
            types: vec![ScriptType::Void; len],
            flags: vec![NodeFlags::empty(); len],
            variables: FxHashMap::default(),
            usings: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub(crate) fn bind_param(&mut self, name: &str, ty: ScriptType) {
        let name = self.program.interner().intern(name);
        self.variables.insert(name, ty);
    }

    pub(crate) fn check_program(mut self) -> Result<TypeTable, TypeError> {
        let program = self.program;
        for &stmt in program.statements() {
            self.infer(stmt)?;
        }
        let return_type = self.program_result()?;
        tracing::debug!(%return_type, nodes = self.types.len(), "analysis complete");
        Ok(TypeTable::new(
            self.types,
            self.flags,
            self.variables,
            return_type,
        ))
    }

    /// Infer and record the type of `id`.
    pub(crate) fn infer(&mut self, id: NodeId) -> Result<ScriptType, TypeError> {
        ensure_sufficient_stack(|| {
            let ty = self.infer_kind(id)?;
            self.record(id, ty.clone());
            Ok(ty)
        })
    }

    fn infer_kind(&mut self, id: NodeId) -> Result<ScriptType, TypeError> {
        let program = self.program;
        let span = program.arena().span(id);
        match *program.arena().kind(id) {
            NodeKind::Null => Ok(ScriptType::Object),
            NodeKind::Char(_) => Ok(ScriptType::Char),
            NodeKind::String(_) | NodeKind::RawString(_) => Ok(ScriptType::String),
            NodeKind::Boolean(_) => Ok(ScriptType::Bool),
            NodeKind::Int(_) => Ok(ScriptType::Int),
            NodeKind::Long(_) => Ok(ScriptType::Long),
            NodeKind::Float(_) => Ok(ScriptType::Float),
            NodeKind::Double(_) => Ok(ScriptType::Double),
            NodeKind::Identifier(name) => Ok(self.lookup(name)),
            NodeKind::Assignment { target, value } => self.infer_assignment(target, value, span),
            NodeKind::MemberAssignment {
                object,
                member,
                value,
            } => self.infer_member_assignment(id, object, member, value, span),
            NodeKind::CollectionAssignment { index, value } => {
                self.infer_collection_assignment(index, value, span)
            }
            NodeKind::Binary { left, op, right } => self.infer_binary(left, op, right, span),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.infer_if(condition, then_branch, else_branch),
            NodeKind::While { condition, body } => self.infer_while(condition, body),
            NodeKind::Return { value } => self.infer_return(value, span),
            NodeKind::MemberAccess { object, member } => {
                self.infer_member_access(id, object, member, span)
            }
            NodeKind::MemberFunctionCall {
                object,
                method,
                args,
            } => self.infer_method_call(id, object, method, args, span),
            NodeKind::FunctionCall { name, args } => {
                self.infer_function_call(id, name, args, span)
            }
            NodeKind::CollectionIndex { .. } => self.infer_index(id, false),
            NodeKind::ArrayDefinition { elements } => self.infer_array(elements),
            NodeKind::ObjectInstantiation {
                ty,
                args,
                initializers,
            } => self.infer_instantiation(ty, args, initializers, span),
            NodeKind::CtorAssignment { class, member, value } => {
                let owner = self.infer(class)?;
                self.check_initializer(id, &owner, member, value, span)?;
                Ok(ScriptType::Void)
            }
            NodeKind::ClassTypeDefinition { name, fields } => self.infer_class(name, fields),
            NodeKind::TypeNode { name } => self.resolve_type(program.name(name), None, span),
            NodeKind::Using { namespace } => {
                self.usings.push(program.name(namespace));
                Ok(ScriptType::Void)
            }
        }
    }

    /// `target = value;` Binds `target` on first assignment.
    fn infer_assignment(
        &mut self,
        target: NodeId,
        value: NodeId,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let value_ty = self.infer(value)?;
        if value_ty == ScriptType::Void {
            return Err(self.error(
                ErrorCode::E2001,
                "cannot assign the result of an expression that has no value",
                span,
            ));
        }
        let NodeKind::Identifier(name) = *self.program.arena().kind(target) else {
            return Err(self.error(ErrorCode::E2001, "invalid assignment target", span));
        };
        let target_ty = match self.variables.get(&name) {
            Some(bound) => {
                let bound = bound.clone();
                if !self.assignable(&bound, &value_ty, value) {
                    return Err(self.error(
                        ErrorCode::E2001,
                        format!(
                            "cannot assign a value of type `{value_ty}` to `{}` of type `{bound}`",
                            self.program.name(name)
                        ),
                        span,
                    ));
                }
                bound
            }
            None => {
                tracing::trace!(name = self.program.name(name), ty = %value_ty, "binding variable");
                self.variables.insert(name, value_ty.clone());
                value_ty
            }
        };
        self.record(target, target_ty);
        Ok(ScriptType::Void)
    }

    fn lookup(&self, name: Name) -> ScriptType {
        self.variables
            .get(&name)
            .cloned()
            .unwrap_or(ScriptType::Object)
    }

    /// Whether `value` (of type `value_ty`) may be stored in a `target` slot.
    pub(crate) fn assignable(
        &self,
        target: &ScriptType,
        value_ty: &ScriptType,
        value: NodeId,
    ) -> bool {
        target.accepts(value_ty)
            || (target.is_reference() && self.is_null_literal(value))
            || (*value_ty == ScriptType::Object
                && self.flags_of(value).contains(NodeFlags::DYNAMIC))
    }

    pub(crate) fn is_null_literal(&self, id: NodeId) -> bool {
        matches!(self.program.arena().kind(id), NodeKind::Null)
    }

    pub(crate) fn record(&mut self, id: NodeId, ty: ScriptType) {
        if let Some(slot) = self.types.get_mut(id.index()) {
            *slot = ty;
        }
    }

    pub(crate) fn mark(&mut self, id: NodeId, flag: NodeFlags) {
        if let Some(slot) = self.flags.get_mut(id.index()) {
            slot.insert(flag);
        }
    }

    fn flags_of(&self, id: NodeId) -> NodeFlags {
        self.flags.get(id.index()).copied().unwrap_or_default()
    }

    /// Children of a node list, borrowed from the program rather than the
    /// checker.
    pub(crate) fn list(&self, range: NodeRange) -> &'a [NodeId] {
        self.program.arena().get_list(range)
    }

    /// Infer each node of a list in order.
    pub(crate) fn infer_all(&mut self, ids: &[NodeId]) -> Result<Vec<ScriptType>, TypeError> {
        ids.iter().map(|&id| self.infer(id)).collect()
    }

    #[cold]
    pub(crate) fn error(
        &self,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
    ) -> TypeError {
        TypeError::new(code, message, span, self.program.locate(span))
    }

    /// Consolidate the `return` sites into the program's result type.
    fn program_result(&self) -> Result<ScriptType, TypeError> {
        let mut result: Option<&ScriptType> = None;
        for site in &self.returns {
            if site.null_literal {
                continue;
            }
            match result {
                None => result = Some(&site.ty),
                Some(first) if *first == site.ty => {}
                Some(first) => {
                    return Err(self.error(
                        ErrorCode::E2008,
                        format!(
                            "inconsistent return types across branches: `{first}` and `{}`",
                            site.ty
                        ),
                        site.span,
                    ));
                }
            }
        }
        match result {
            Some(ty) => {
                // `return null;` is only compatible with a reference result.
                if let Some(site) = self
                    .returns
                    .iter()
                    .find(|site| site.null_literal && !ty.is_reference())
                {
                    return Err(self.error(
                        ErrorCode::E2008,
                        format!("inconsistent return types across branches: `{ty}` and `null`"),
                        site.span,
                    ));
                }
                Ok(ty.clone())
            }
            None if self.returns.is_empty() => Ok(ScriptType::Void),
            None => Ok(ScriptType::Object),
        }
    }
}

/// Render argument types as `(int, string)`.
pub(crate) fn describe_args(args: &[ScriptType]) -> String {
    let parts: Vec<String> = args.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(", "))
}
