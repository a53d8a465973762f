//! Statement emission.

use serein_ir::{NodeId, NodeKind, NodeRange, ScriptType};

use super::expr::{emit_assignment, emit_call, emit_expr, emit_operand};
use crate::{CodegenContext, CodegenError};

/// Emit statements in order.
pub fn emit_block(ctx: &mut CodegenContext<'_>, statements: &[NodeId]) -> Result<(), CodegenError> {
    for &stmt in statements {
        emit_stmt(ctx, stmt)?;
    }
    Ok(())
}

/// Emit one statement.
pub fn emit_stmt(ctx: &mut CodegenContext<'_>, id: NodeId) -> Result<(), CodegenError> {
    match *ctx.arena().kind(id) {
        NodeKind::If {
            condition,
            then_branch,
            else_branch,
        } => emit_if(ctx, condition, then_branch, else_branch, false),
        NodeKind::While { condition, body } => {
            let condition = emit_operand(ctx, condition)?;
            ctx.writeln(&format!("while ({condition} == true)"));
            emit_braced(ctx, body)
        }
        // A `void` call cannot be returned in C#; the method is `void` too.
        NodeKind::Return { value: Some(value) } if *ctx.type_of(value) == ScriptType::Void => {
            emit_stmt(ctx, value)?;
            ctx.writeln("return;");
            Ok(())
        }
        NodeKind::Return { value: Some(value) } => {
            let value = emit_expr(ctx, value)?;
            ctx.writeln(&format!("return {value};"));
            Ok(())
        }
        NodeKind::Return { value: None } => {
            ctx.writeln("return;");
            Ok(())
        }

        NodeKind::Assignment { .. }
        | NodeKind::MemberAssignment { .. }
        | NodeKind::CollectionAssignment { .. } => {
            let assignment = emit_assignment(ctx, id)?;
            ctx.writeln(&format!("{assignment};"));
            Ok(())
        }
        NodeKind::MemberFunctionCall { .. } | NodeKind::FunctionCall { .. } => {
            let call = emit_call(ctx, id)?;
            if ctx.is_async(id) {
                ctx.writeln(&format!("await {call};"));
            } else {
                ctx.writeln(&format!("{call};"));
            }
            Ok(())
        }

        // Declarations are hoisted to the top of the unit.
        NodeKind::ClassTypeDefinition { .. }
        | NodeKind::Using { .. }
        | NodeKind::TypeNode { .. } => Ok(()),

        _ => {
            let value = emit_expr(ctx, id)?;
            ctx.writeln(&format!("_ = {value};"));
            Ok(())
        }
    }
}

/// `if`, with an `else` holding a single `if` written as `else if`.
fn emit_if(
    ctx: &mut CodegenContext<'_>,
    condition: NodeId,
    then_branch: NodeRange,
    else_branch: NodeRange,
    chained: bool,
) -> Result<(), CodegenError> {
    let condition = emit_operand(ctx, condition)?;
    let head = format!("if ({condition} == true)");
    if chained {
        ctx.write(&head);
        ctx.newline();
    } else {
        ctx.writeln(&head);
    }
    emit_braced(ctx, then_branch)?;

    if else_branch.is_empty() {
        return Ok(());
    }
    let else_stmts = ctx.list(else_branch);
    if let [single] = *else_stmts {
        if let NodeKind::If {
            condition,
            then_branch,
            else_branch,
        } = *ctx.arena().kind(single)
        {
            ctx.write_indent();
            ctx.write("else ");
            return emit_if(ctx, condition, then_branch, else_branch, true);
        }
    }
    ctx.writeln("else");
    emit_braced(ctx, else_branch)
}

fn emit_braced(ctx: &mut CodegenContext<'_>, body: NodeRange) -> Result<(), CodegenError> {
    let statements = ctx.list(body);
    ctx.open_block();
    emit_block(ctx, statements)?;
    ctx.close_block();
    Ok(())
}
