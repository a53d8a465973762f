//! `if`, `while` and `return`.

use serein_diagnostic::ErrorCode;
use serein_ir::{NodeId, NodeRange, ScriptType, Span};

use super::{Checker, ReturnSite};
use crate::TypeError;

impl Checker<'_> {
    pub(super) fn infer_if(
        &mut self,
        condition: NodeId,
        then_branch: NodeRange,
        else_branch: NodeRange,
    ) -> Result<ScriptType, TypeError> {
        self.check_condition(condition, "if")?;
        self.infer_block(then_branch)?;
        self.infer_block(else_branch)?;
        Ok(ScriptType::Void)
    }

    pub(super) fn infer_while(
        &mut self,
        condition: NodeId,
        body: NodeRange,
    ) -> Result<ScriptType, TypeError> {
        self.check_condition(condition, "while")?;
        self.infer_block(body)?;
        Ok(ScriptType::Void)
    }

    pub(super) fn infer_return(
        &mut self,
        value: Option<NodeId>,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let (ty, null_literal) = match value {
            Some(value) => (self.infer(value)?, self.is_null_literal(value)),
            None => (ScriptType::Void, false),
        };
        self.returns.push(ReturnSite {
            ty: ty.clone(),
            null_literal,
            span,
        });
        Ok(ty)
    }

    fn check_condition(&mut self, condition: NodeId, keyword: &str) -> Result<(), TypeError> {
        let ty = self.infer(condition)?;
        if matches!(ty, ScriptType::Bool | ScriptType::Object) {
            return Ok(());
        }
        let span = self.program.arena().span(condition);
        Err(self.error(
            ErrorCode::E2003,
            format!("`{keyword}` condition must be `bool`, found `{ty}`"),
            span,
        ))
    }

    fn infer_block(&mut self, block: NodeRange) -> Result<(), TypeError> {
        let stmts = self.list(block);
        for &stmt in stmts {
            self.infer(stmt)?;
        }
        Ok(())
    }
}
