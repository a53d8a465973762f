//! Expression emission.
//!
//! Every function returns the expression text; nothing is written to the
//! context buffer here. Binary operations and nested assignments come back
//! parenthesized, so callers can splice the result anywhere.

use serein_ir::{NodeId, NodeKind, NodeRange, ScriptType};

use super::syntax;
use crate::{CodegenContext, CodegenError};

/// Emit an expression.
pub fn emit_expr(ctx: &CodegenContext<'_>, id: NodeId) -> Result<String, CodegenError> {
    let text = match *ctx.arena().kind(id) {
        NodeKind::Null => "null".to_owned(),
        NodeKind::Char(c) => syntax::char_literal(c),
        NodeKind::String(s) => syntax::string_literal(ctx.resolve_name(s)),
        NodeKind::RawString(s) => syntax::verbatim_literal(ctx.resolve_name(s)),
        NodeKind::Boolean(b) => b.to_string(),
        NodeKind::Int(n) => n.to_string(),
        NodeKind::Long(n) => format!("{n}L"),
        NodeKind::Float(bits) => syntax::float_literal(f32::from_bits(bits)),
        NodeKind::Double(bits) => syntax::double_literal(f64::from_bits(bits)),
        NodeKind::Identifier(name) => syntax::identifier(ctx.resolve_name(name)),

        NodeKind::Assignment { .. }
        | NodeKind::MemberAssignment { .. }
        | NodeKind::CollectionAssignment { .. } => format!("({})", emit_assignment(ctx, id)?),

        NodeKind::Binary { left, op, right } => {
            let left = emit_operand(ctx, left)?;
            let right = emit_operand(ctx, right)?;
            format!("({left} {op} {right})")
        }

        NodeKind::MemberAccess { object, member } => {
            let receiver = emit_receiver(ctx, object, id)?;
            format!("{receiver}.{}", ctx.resolve_name(member))
        }
        NodeKind::CollectionIndex { collection, index } => {
            let receiver = emit_receiver(ctx, collection, id)?;
            format!("{receiver}[{}]", emit_expr(ctx, index)?)
        }
        NodeKind::MemberFunctionCall { .. } | NodeKind::FunctionCall { .. } => {
            let call = emit_call(ctx, id)?;
            if ctx.is_async(id) {
                format!("(await {call})")
            } else {
                call
            }
        }

        NodeKind::ArrayDefinition { elements } => {
            let element = ctx
                .type_of(id)
                .element_type()
                .map_or_else(|| "object".to_owned(), syntax::type_name);
            let items = emit_args(ctx, elements)?;
            if items.is_empty() {
                format!("new {element}[] {{ }}")
            } else {
                format!("new {element}[] {{ {items} }}")
            }
        }
        NodeKind::ObjectInstantiation {
            ty,
            args,
            initializers,
        } => emit_instantiation(ctx, ty, args, initializers)?,

        NodeKind::CtorAssignment { .. }
        | NodeKind::If { .. }
        | NodeKind::While { .. }
        | NodeKind::Return { .. }
        | NodeKind::ClassTypeDefinition { .. }
        | NodeKind::TypeNode { .. }
        | NodeKind::Using { .. } => {
            return Err(CodegenError::Unsupported(format!(
                "`{}` cannot be emitted as an expression",
                ctx.arena().kind(id).label()
            )))
        }
    };
    Ok(text)
}

/// An assignment without surrounding parentheses, as used in statement
/// position.
pub(super) fn emit_assignment(
    ctx: &CodegenContext<'_>,
    id: NodeId,
) -> Result<String, CodegenError> {
    match *ctx.arena().kind(id) {
        NodeKind::Assignment { target, value } => {
            Ok(format!("{} = {}", emit_expr(ctx, target)?, emit_expr(ctx, value)?))
        }
        NodeKind::MemberAssignment {
            object,
            member,
            value,
        } => {
            let receiver = emit_receiver(ctx, object, id)?;
            Ok(format!(
                "{receiver}.{} = {}",
                ctx.resolve_name(member),
                emit_expr(ctx, value)?
            ))
        }
        NodeKind::CollectionAssignment { index, value } => {
            Ok(format!("{} = {}", emit_expr(ctx, index)?, emit_expr(ctx, value)?))
        }
        _ => emit_expr(ctx, id),
    }
}

/// A call without the `await` wrapper.
pub(super) fn emit_call(ctx: &CodegenContext<'_>, id: NodeId) -> Result<String, CodegenError> {
    match *ctx.arena().kind(id) {
        NodeKind::MemberFunctionCall {
            object,
            method,
            args,
        } => {
            let receiver = emit_receiver(ctx, object, id)?;
            Ok(format!(
                "{receiver}.{}({})",
                ctx.resolve_name(method),
                emit_args(ctx, args)?
            ))
        }
        NodeKind::FunctionCall { name, args } => Ok(format!(
            "{}.{}({})",
            ctx.options.function_host,
            ctx.resolve_name(name),
            emit_args(ctx, args)?
        )),
        _ => emit_expr(ctx, id),
    }
}

/// The receiver of a member or index access. Accesses the analyzer left
/// to run time go through `dynamic`.
/// Emit an operand or condition. An `object` value goes through `dynamic`
/// so the host binds the operator to its run-time type.
pub(super) fn emit_operand(ctx: &CodegenContext<'_>, id: NodeId) -> Result<String, CodegenError> {
    let text = emit_expr(ctx, id)?;
    let already_dynamic = ctx.is_dynamic(id) || matches!(ctx.arena().kind(id), NodeKind::Null);
    if *ctx.type_of(id) == ScriptType::Object && !already_dynamic {
        Ok(format!("((dynamic){text})"))
    } else {
        Ok(text)
    }
}

fn emit_receiver(
    ctx: &CodegenContext<'_>,
    object: NodeId,
    access: NodeId,
) -> Result<String, CodegenError> {
    let receiver = emit_expr(ctx, object)?;
    if ctx.is_dynamic(access) {
        Ok(format!("((dynamic){receiver})"))
    } else {
        Ok(receiver)
    }
}

fn emit_args(ctx: &CodegenContext<'_>, args: NodeRange) -> Result<String, CodegenError> {
    let args = ctx
        .list(args)
        .iter()
        .map(|&arg| emit_expr(ctx, arg))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(args.join(", "))
}

fn emit_instantiation(
    ctx: &CodegenContext<'_>,
    ty: NodeId,
    args: NodeRange,
    initializers: NodeRange,
) -> Result<String, CodegenError> {
    let mut text = format!(
        "new {}({})",
        syntax::type_name(ctx.type_of(ty)),
        emit_args(ctx, args)?
    );
    let inits = ctx.list(initializers);
    if !inits.is_empty() {
        let members = inits
            .iter()
            .map(|&init| match *ctx.arena().kind(init) {
                NodeKind::CtorAssignment { member, value, .. } => Ok(format!(
                    "{} = {}",
                    ctx.resolve_name(member),
                    emit_expr(ctx, value)?
                )),
                ref other => Err(CodegenError::Unsupported(format!(
                    "`{}` inside an object initializer",
                    other.label()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        text.push_str(" { ");
        text.push_str(&members.join(", "));
        text.push_str(" }");
    }
    Ok(text)
}
