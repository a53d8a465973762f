//! Member access, method calls and mounted function calls.

use serein_diagnostic::ErrorCode;
use serein_ir::{Name, NodeId, NodeRange, ScriptType, Span};
use serein_runtime::TypeDescriptor;

use super::{describe_args, Checker};
use crate::{builtin_method, builtin_property, NodeFlags, TypeError};

impl Checker<'_> {
    pub(super) fn infer_member_access(
        &mut self,
        id: NodeId,
        object: NodeId,
        member: Name,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let receiver = self.infer(object)?;
        self.member_type(id, &receiver, member, false, span)
    }

    pub(super) fn infer_member_assignment(
        &mut self,
        id: NodeId,
        object: NodeId,
        member: Name,
        value: NodeId,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let receiver = self.infer(object)?;
        self.check_initializer(id, &receiver, member, value, span)?;
        Ok(ScriptType::Void)
    }

    /// Check `owner.member = value`, shared by member assignments and
    /// initializer entries.
    pub(super) fn check_initializer(
        &mut self,
        id: NodeId,
        owner: &ScriptType,
        member: Name,
        value: NodeId,
        span: Span,
    ) -> Result<(), TypeError> {
        let slot = self.member_type(id, owner, member, true, span)?;
        let value_ty = self.infer(value)?;
        if value_ty == ScriptType::Void || !self.assignable(&slot, &value_ty, value) {
            return Err(self.error(
                ErrorCode::E2001,
                format!(
                    "cannot assign a value of type `{value_ty}` to member `{}` of type `{slot}`",
                    self.program.name(member)
                ),
                span,
            ));
        }
        Ok(())
    }

    /// Type of `receiver.member`. `write` requires the member to be settable.
    fn member_type(
        &mut self,
        id: NodeId,
        receiver: &ScriptType,
        member: Name,
        write: bool,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let name = self.program.name(member);
        if *receiver == ScriptType::Object {
            self.mark(id, NodeFlags::DYNAMIC);
            return Ok(ScriptType::Object);
        }
        if let Some(ty) = builtin_property(receiver, name) {
            if write {
                return Err(self.read_only(receiver, name, span));
            }
            return Ok(ty);
        }
        if let ScriptType::Named(type_name) = receiver {
            match self.registries.types.get(type_name) {
                Some(TypeDescriptor::Record(layout)) => {
                    if let Some(field) = layout.field(name) {
                        return Ok(field.ty.clone());
                    }
                }
                Some(TypeDescriptor::External(external)) => {
                    if let Some(property) = external.property(name) {
                        if write && !property.is_writable() {
                            return Err(self.read_only(receiver, name, span));
                        }
                        return Ok(property.ty().clone());
                    }
                }
                None => {}
            }
        }
        Err(self.error(
            ErrorCode::E2004,
            format!("type `{receiver}` has no member `{name}`"),
            span,
        ))
    }

    #[cold]
    fn read_only(&self, receiver: &ScriptType, name: &str, span: Span) -> TypeError {
        self.error(
            ErrorCode::E2011,
            format!("member `{name}` of type `{receiver}` is read-only"),
            span,
        )
    }

    pub(super) fn infer_method_call(
        &mut self,
        id: NodeId,
        object: NodeId,
        method: Name,
        args: NodeRange,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let receiver = self.infer(object)?;
        let arg_ids = self.list(args);
        let arg_types = self.infer_all(arg_ids)?;
        let name = self.program.name(method);

        if receiver == ScriptType::Object {
            self.mark(id, NodeFlags::DYNAMIC);
            return Ok(ScriptType::Object);
        }

        if let ScriptType::Named(type_name) = &receiver {
            if let Some(external) = self.registries.types.external(type_name) {
                if let Some(found) = external.resolve_method(name, &arg_types) {
                    let ret = found.return_type().clone();
                    return Ok(self.call_result(id, ret));
                }
                if external.has_method(name) {
                    return Err(self.error(
                        ErrorCode::E2005,
                        format!(
                            "no overload of `{receiver}.{name}` accepts {}",
                            describe_args(&arg_types)
                        ),
                        span,
                    ));
                }
            }
        }

        let Some((params, ret)) = builtin_method(&receiver, name, arg_types.len()) else {
            return Err(self.error(
                ErrorCode::E2005,
                format!(
                    "type `{receiver}` has no method `{name}` taking {} argument(s)",
                    arg_types.len()
                ),
                span,
            ));
        };
        if !self.arguments_fit(&params, &arg_types, arg_ids) {
            return Err(self.error(
                ErrorCode::E2005,
                format!(
                    "`{receiver}.{name}` expects {} but was called with {}",
                    describe_args(&params),
                    describe_args(&arg_types)
                ),
                span,
            ));
        }
        Ok(ret)
    }

    pub(super) fn infer_function_call(
        &mut self,
        id: NodeId,
        name: Name,
        args: NodeRange,
        span: Span,
    ) -> Result<ScriptType, TypeError> {
        let arg_ids = self.list(args);
        let arg_types = self.infer_all(arg_ids)?;
        let fn_name = self.program.name(name);
        let Some(function) = self.registries.functions.get(fn_name) else {
            return Err(self.error(
                ErrorCode::E2009,
                format!("unknown function `{fn_name}`"),
                span,
            ));
        };
        if !self.arguments_fit(function.params(), &arg_types, arg_ids) {
            return Err(self.error(
                ErrorCode::E2005,
                format!(
                    "function `{fn_name}` expects {} but was called with {}",
                    describe_args(function.params()),
                    describe_args(&arg_types)
                ),
                span,
            ));
        }
        Ok(self.call_result(id, function.return_type().clone()))
    }

    /// `object` arguments are checked when the call runs.
    fn arguments_fit(
        &self,
        params: &[ScriptType],
        args: &[ScriptType],
        arg_ids: &[NodeId],
    ) -> bool {
        params.len() == args.len()
            && params
                .iter()
                .zip(args.iter().zip(arg_ids))
                .all(|(param, (arg, &node))| {
                    *arg == ScriptType::Object
                        || (*arg != ScriptType::Void && self.assignable(param, arg, node))
                })
    }

    /// A `Task` return marks the call async and yields the awaited type.
    fn call_result(&mut self, id: NodeId, ret: ScriptType) -> ScriptType {
        match ret.task_result() {
            Some(awaited) => {
                tracing::trace!(node = id.index(), %awaited, "async call");
                self.mark(id, NodeFlags::ASYNC_CALL);
                awaited
            }
            None => ret,
        }
    }
}
