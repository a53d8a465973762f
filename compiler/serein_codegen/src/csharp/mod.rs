//! C# emission.
//!
//! The unit is laid out as: standard usings, script usings, record classes,
//! then one static class holding the method.

mod expr;
mod stmt;
pub mod syntax;

use serein_ir::{NodeId, NodeKind, ScriptType};

pub use expr::emit_expr;
pub use stmt::{emit_block, emit_stmt};

use crate::analysis::Declarations;
use crate::{CodegenContext, CodegenError, ParamInfo};

/// Namespaces every generated unit imports.
pub const STANDARD_USINGS: [&str; 3] = [
    "System",
    "System.Collections.Generic",
    "System.Threading.Tasks",
];

/// Locals nothing could type are declared as `object`.
static OBJECT: ScriptType = ScriptType::Object;

/// Emit the complete unit for one method.
pub fn emit_unit(
    ctx: &mut CodegenContext<'_>,
    method_name: &str,
    params: &[ParamInfo],
) -> Result<(), CodegenError> {
    let param_names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    let decls = Declarations::collect(ctx.program, &param_names);

    for namespace in STANDARD_USINGS {
        ctx.writeln(&format!("using {namespace};"));
    }
    for &namespace in &decls.usings {
        let namespace = ctx.resolve_name(namespace);
        if !STANDARD_USINGS.contains(&namespace) {
            ctx.writeln(&format!("using {namespace};"));
        }
    }
    ctx.newline();

    for &record in &decls.records {
        emit_record(ctx, record)?;
        ctx.newline();
    }

    let class_name = &ctx.options.class_name;
    ctx.writeln(&format!("public static class {class_name}"));
    ctx.open_block();
    emit_method(ctx, method_name, params, &decls)?;
    ctx.close_block();
    Ok(())
}

fn emit_record(ctx: &mut CodegenContext<'_>, id: NodeId) -> Result<(), CodegenError> {
    let NodeKind::ClassTypeDefinition { name, fields } = *ctx.arena().kind(id) else {
        return Err(CodegenError::Unsupported(format!(
            "node {} is not a class definition",
            id.index()
        )));
    };
    ctx.writeln(&format!("public class {}", ctx.resolve_name(name)));
    ctx.open_block();
    for field in ctx.arena().get_fields(fields) {
        let ty = syntax::type_name(ctx.type_of(field.ty));
        let field_name = ctx.resolve_name(field.name);
        ctx.writeln(&format!("public {ty} {field_name} {{ get; set; }}"));
    }
    ctx.close_block();
    Ok(())
}

fn emit_method(
    ctx: &mut CodegenContext<'_>,
    method_name: &str,
    params: &[ParamInfo],
    decls: &Declarations,
) -> Result<(), CodegenError> {
    let is_async = ctx.table.has_async_calls();
    let result = ctx.table.return_type();
    let signature = params
        .iter()
        .map(|p| format!("{} {}", p.cs_type, syntax::identifier(&p.name)))
        .collect::<Vec<_>>()
        .join(", ");
    let modifiers = if is_async { "public static async" } else { "public static" };
    let return_type = syntax::method_return_type(result, is_async);
    ctx.writeln(&format!("{modifiers} {return_type} {method_name}({signature})"));
    ctx.open_block();

    for &(name, first) in &decls.locals {
        let ty = match ctx.table.variable(name) {
            Some(ty) if *ty != ScriptType::Void => ty,
            _ => match ctx.type_of(first) {
                ScriptType::Void => &OBJECT,
                ty => ty,
            },
        };
        let local = syntax::identifier(ctx.resolve_name(name));
        ctx.writeln(&format!("{} {local} = default;", syntax::type_name(ty)));
    }

    let statements = ctx.program.statements();
    emit_block(ctx, statements)?;

    let ends_in_return = statements
        .last()
        .is_some_and(|&last| matches!(ctx.arena().kind(last), NodeKind::Return { .. }));
    if *result != ScriptType::Void && !ends_in_return {
        ctx.writeln("return default;");
    }
    ctx.close_block();
    Ok(())
}
