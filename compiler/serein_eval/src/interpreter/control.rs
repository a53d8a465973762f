//! Statement blocks, `if`, `while` and `return`.

use serein_ir::{NodeId, NodeRange};
use serein_runtime::{EvalError, EvalResult, Value};

use super::Interpreter;
use crate::InvocationContext;

impl Interpreter<'_> {
    /// Run statements in order, stopping after a `return`.
    pub(super) async fn eval_block(
        &self,
        ctx: &InvocationContext,
        body: NodeRange,
    ) -> Result<(), EvalError> {
        for &stmt in self.list(body) {
            self.eval(ctx, stmt).await?;
            if ctx.should_return() {
                break;
            }
        }
        Ok(())
    }

    pub(super) async fn eval_if(
        &self,
        ctx: &InvocationContext,
        condition: NodeId,
        then_branch: NodeRange,
        else_branch: NodeRange,
    ) -> EvalResult {
        if self.eval_condition(ctx, condition).await? {
            self.eval_block(ctx, then_branch).await?;
        } else {
            self.eval_block(ctx, else_branch).await?;
        }
        Ok(Value::Null)
    }

    pub(super) async fn eval_while(
        &self,
        ctx: &InvocationContext,
        condition: NodeId,
        body: NodeRange,
    ) -> EvalResult {
        let mut iterations: u64 = 0;
        loop {
            if !self.eval_condition(ctx, condition).await? || body.is_empty() {
                break;
            }
            self.eval_block(ctx, body).await?;
            iterations += 1;
            if ctx.should_return() {
                break;
            }
        }
        tracing::trace!(iterations, "loop finished");
        Ok(Value::Null)
    }

    pub(super) async fn eval_return(
        &self,
        ctx: &InvocationContext,
        value: Option<NodeId>,
    ) -> EvalResult {
        let value = match value {
            Some(id) => self
                .eval(ctx, id)
                .await?
                .coerce_to(self.table.return_type()),
            None => Value::Null,
        };
        ctx.request_return(value.clone());
        Ok(value)
    }

    /// A condition must produce a runtime `bool`.
    async fn eval_condition(
        &self,
        ctx: &InvocationContext,
        condition: NodeId,
    ) -> Result<bool, EvalError> {
        let value = self.eval(ctx, condition).await?;
        value.as_bool().ok_or_else(|| {
            EvalError::non_bool_condition(&value).at(self.program.arena().span(condition))
        })
    }
}
