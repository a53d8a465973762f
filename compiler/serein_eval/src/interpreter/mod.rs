//! Async tree-walking interpreter.
//!
//! # Architecture
//!
//! Every node evaluation goes through [`Interpreter::eval`], which returns a
//! boxed `Send` future so that recursion through the AST has a nameable
//! type. Each of those futures is polled under the stack guard, since deep
//! expression chains recurse inside `poll`.
//!
//! Helpers are split by node category:
//!
//! - `control` - `if`, `while`, `return`, statement blocks
//! - `access` - member and collection reads and writes
//! - `calls` - method and function calls, object instantiation
//!
//! The interpreter holds only shared references. All per-run state lives in
//! the [`InvocationContext`], which is why one compiled script may run on
//! several contexts at once.

mod access;
mod calls;
mod control;

use std::future::Future;
use std::pin::Pin;

use serein_ir::{BinaryOp, Name, NodeId, NodeKind, NodeRange, Program, ScriptType};
use serein_runtime::{EvalError, EvalResult, Registries, Value};
use serein_stack::StackGuarded;
use serein_types::TypeTable;

use crate::{evaluate_binary, DelegateCache, InvocationContext};

/// A pending node evaluation.
pub type EvalFuture<'a> = Pin<Box<dyn Future<Output = EvalResult> + Send + 'a>>;

/// Evaluates one analyzed program.
pub struct Interpreter<'a> {
    program: &'a Program,
    table: &'a TypeTable,
    registries: &'a Registries,
    cache: &'a DelegateCache,
}

impl<'a> Interpreter<'a> {
    /// `table` must have been built for `program`, and `cache` must only
    /// ever be used with this program.
    pub fn new(
        program: &'a Program,
        table: &'a TypeTable,
        registries: &'a Registries,
        cache: &'a DelegateCache,
    ) -> Self {
        Interpreter {
            program,
            table,
            registries,
            cache,
        }
    }

    /// Run the program on `ctx`.
    ///
    /// Returns the value of an explicit `return`, otherwise the value of the
    /// last statement evaluated.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn execute(&self, ctx: &mut InvocationContext) -> EvalResult {
        let ctx: &InvocationContext = ctx;
        if ctx.token().is_cancelled() {
            return Err(EvalError::cancelled());
        }
        ctx.reset_return();
        let mut last = Value::Null;
        for &stmt in self.program.statements() {
            last = self.eval(ctx, stmt).await?;
            if ctx.should_return() {
                break;
            }
        }
        let result = ctx.take_return().unwrap_or(last);
        tracing::debug!(result = %result, "run complete");
        Ok(result)
    }

    /// Evaluate one node. Failures without a span get this node's.
    pub fn eval<'s>(&'s self, ctx: &'s InvocationContext, id: NodeId) -> EvalFuture<'s> {
        Box::pin(StackGuarded::new(Box::pin(async move {
            self.eval_kind(ctx, id)
                .await
                .map_err(|e| e.at(self.program.arena().span(id)))
        })))
    }

    async fn eval_kind(&self, ctx: &InvocationContext, id: NodeId) -> EvalResult {
        match *self.program.arena().kind(id) {
            NodeKind::Null => Ok(Value::Null),
            NodeKind::Char(c) => Ok(Value::Char(c)),
            NodeKind::String(s) | NodeKind::RawString(s) => Ok(Value::string(self.name(s))),
            NodeKind::Boolean(b) => Ok(Value::Bool(b)),
            NodeKind::Int(n) => Ok(Value::Int(n)),
            NodeKind::Long(n) => Ok(Value::Long(n)),
            NodeKind::Float(bits) => Ok(Value::Float(f32::from_bits(bits))),
            NodeKind::Double(bits) => Ok(Value::Double(f64::from_bits(bits))),
            NodeKind::Identifier(name) => Ok(ctx.get(self.name(name))),
            NodeKind::Assignment { target, value } => {
                self.eval_assignment(ctx, target, value).await
            }
            NodeKind::Binary { left, op, right } => self.eval_binary(ctx, left, op, right).await,
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => self.eval_if(ctx, condition, then_branch, else_branch).await,
            NodeKind::While { condition, body } => self.eval_while(ctx, condition, body).await,
            NodeKind::Return { value } => self.eval_return(ctx, value).await,
            NodeKind::MemberAccess { object, member } => {
                self.eval_member_access(ctx, id, object, member).await
            }
            NodeKind::MemberAssignment {
                object,
                member,
                value,
            } => self.eval_member_assignment(ctx, id, object, member, value).await,
            NodeKind::CollectionIndex { collection, index } => {
                self.eval_index(ctx, id, collection, index).await
            }
            NodeKind::CollectionAssignment { index, value } => {
                self.eval_collection_assignment(ctx, index, value).await
            }
            NodeKind::MemberFunctionCall {
                object,
                method,
                args,
            } => self.eval_method_call(ctx, id, object, method, args).await,
            NodeKind::FunctionCall { name, args } => {
                self.eval_function_call(ctx, id, name, args).await
            }
            NodeKind::ArrayDefinition { elements } => self.eval_array(ctx, id, elements).await,
            NodeKind::ObjectInstantiation {
                ty,
                args,
                initializers,
            } => self.eval_instantiation(ctx, id, ty, args, initializers).await,
            // Initializers run as part of their instantiation.
            NodeKind::CtorAssignment { .. } => Ok(Value::Null),
            // Declarations took effect during analysis.
            NodeKind::ClassTypeDefinition { .. }
            | NodeKind::TypeNode { .. }
            | NodeKind::Using { .. } => Ok(Value::Null),
        }
    }

    /// `name = value;` The value is widened to the variable's bound type.
    async fn eval_assignment(
        &self,
        ctx: &InvocationContext,
        target: NodeId,
        value: NodeId,
    ) -> EvalResult {
        let value = self.eval(ctx, value).await?;
        let NodeKind::Identifier(name) = *self.program.arena().kind(target) else {
            return Err(EvalError::type_mismatch("a variable", "an expression"));
        };
        let value = value.coerce_to(self.variable_type(name, target));
        ctx.set(self.name(name), value);
        Ok(Value::Null)
    }

    async fn eval_binary(
        &self,
        ctx: &InvocationContext,
        left: NodeId,
        op: BinaryOp,
        right: NodeId,
    ) -> EvalResult {
        let lhs = self.eval(ctx, left).await?;
        if op.is_logical() {
            return self.eval_logical(ctx, lhs, op, right).await;
        }
        let rhs = self.eval(ctx, right).await?;
        evaluate_binary(
            lhs,
            rhs,
            op,
            self.table.type_of(left),
            self.table.type_of(right),
        )
    }

    /// `&&` and `||` only evaluate the right operand when it decides the
    /// result.
    async fn eval_logical(
        &self,
        ctx: &InvocationContext,
        lhs: Value,
        op: BinaryOp,
        right: NodeId,
    ) -> EvalResult {
        let Some(decided) = lhs.as_bool() else {
            return Err(logical_operand_error(op, &lhs, &Value::Bool(false)));
        };
        if (op == BinaryOp::And && !decided) || (op == BinaryOp::Or && decided) {
            return Ok(Value::Bool(decided));
        }
        let rhs = self.eval(ctx, right).await?;
        match rhs.as_bool() {
            Some(b) => Ok(Value::Bool(b)),
            None => Err(logical_operand_error(op, &lhs, &rhs)),
        }
    }

    async fn eval_array(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        elements: NodeRange,
    ) -> EvalResult {
        let element = self
            .table
            .type_of(id)
            .element_type()
            .cloned()
            .unwrap_or(ScriptType::Object);
        let mut items = Vec::with_capacity(elements.len());
        for &item in self.list(elements) {
            items.push(self.eval(ctx, item).await?.coerce_to(&element));
        }
        Ok(Value::array(element, items))
    }

    /// Evaluate `ids` in order.
    async fn eval_args(
        &self,
        ctx: &InvocationContext,
        ids: &[NodeId],
    ) -> Result<Vec<Value>, EvalError> {
        let mut values = Vec::with_capacity(ids.len());
        for &id in ids {
            values.push(self.eval(ctx, id).await?);
        }
        Ok(values)
    }

    fn variable_type(&self, name: Name, target: NodeId) -> &ScriptType {
        self.table
            .variable(name)
            .unwrap_or_else(|| self.table.type_of(target))
    }

    #[inline]
    fn name(&self, name: Name) -> &'static str {
        self.program.name(name)
    }

    #[inline]
    fn list(&self, range: NodeRange) -> &'a [NodeId] {
        self.program.arena().get_list(range)
    }
}

#[cold]
fn logical_operand_error(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    if left.is_null() || right.is_null() {
        EvalError::null_operand(op)
    } else {
        EvalError::invalid_operands(op, left, right)
    }
}
