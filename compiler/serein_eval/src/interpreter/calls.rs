//! Method calls, mounted function calls and object instantiation.
//!
//! Every native call is awaited the same way: synchronous handles return a
//! ready future. The await races the context's cancellation token.

use serein_ir::{Name, NodeId, NodeKind, NodeRange, ScriptType};
use serein_runtime::{CallFuture, EvalError, EvalResult, ExternalValue, TypeDescriptor, Value};

use super::access::null_receiver;
use super::Interpreter;
use crate::builtins;
use crate::cache::{Accessor, CacheKey};
use crate::InvocationContext;

impl Interpreter<'_> {
    pub(super) async fn eval_method_call(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        object: NodeId,
        method: Name,
        args: NodeRange,
    ) -> EvalResult {
        let receiver = self.eval(ctx, object).await?;
        let args = self.eval_args(ctx, self.list(args)).await?;
        let method = self.name(method);
        if receiver.is_null() {
            return null_receiver(ctx, method);
        }

        let key = CacheKey::for_call(receiver.runtime_type(), &args);
        let accessor = self.cache.get_or_resolve(id, key, |_| {
            if let Value::External(external) = &receiver {
                if let Some(ty) = self.registries.types.external(external.type_name()) {
                    if let Some(overload) = ty.select_method(method, &args) {
                        return Ok(Accessor::Method(overload.clone()));
                    }
                    if ty.has_method(method) {
                        return Err(EvalError::missing_method(external.type_name(), method));
                    }
                }
            }
            if builtins::has_method(&receiver, method, args.len()) {
                Ok(Accessor::BuiltinMethod)
            } else {
                Err(EvalError::missing_method(&receiver.type_name(), method))
            }
        })?;

        match accessor {
            Accessor::Method(overload) => {
                let args = coerce_args(args, overload.params());
                tracing::trace!(method, is_async = overload.is_async(), "invoking host method");
                self.await_call(ctx, overload.invoke(receiver, args)).await
            }
            _ => builtins::call_method(&receiver, method, &args),
        }
    }

    pub(super) async fn eval_function_call(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        name: Name,
        args: NodeRange,
    ) -> EvalResult {
        let args = self.eval_args(ctx, self.list(args)).await?;
        let name = self.name(name);
        let accessor = self
            .cache
            .get_or_resolve(id, CacheKey::new(ScriptType::Void), |_| {
                self.registries
                    .functions
                    .get(name)
                    .map(Accessor::Function)
                    .ok_or_else(|| EvalError::unknown_function(name))
            })?;
        let Accessor::Function(function) = accessor else {
            return Err(EvalError::unknown_function(name));
        };
        let args = coerce_args(args, function.params());
        tracing::trace!(name, is_async = function.is_async(), "invoking mounted function");
        self.await_call(ctx, function.call(args)).await
    }

    /// `new T(args) { Member = value, ... }`
    pub(super) async fn eval_instantiation(
        &self,
        ctx: &InvocationContext,
        id: NodeId,
        ty: NodeId,
        args: NodeRange,
        initializers: NodeRange,
    ) -> EvalResult {
        let args = self.eval_args(ctx, self.list(args)).await?;
        let target = self.table.type_of(ty).clone();
        let ScriptType::Named(type_name) = &target else {
            return Err(EvalError::instantiation(
                &target.to_string(),
                "only registered types can be created",
            ));
        };

        let key = CacheKey::for_call(target.clone(), &args);
        let accessor = self.cache.get_or_resolve(id, key, |_| {
            match self.registries.types.get(type_name) {
                Some(TypeDescriptor::Record(layout)) => Ok(Accessor::Record(layout)),
                Some(TypeDescriptor::External(external)) => external
                    .select_constructor(&args)
                    .cloned()
                    .map(Accessor::Constructor)
                    .ok_or_else(|| {
                        EvalError::instantiation(type_name, "no constructor accepts the arguments")
                    }),
                None => Err(EvalError::instantiation(type_name, "the type is not registered")),
            }
        })?;

        let object = match accessor {
            Accessor::Record(layout) => Value::Record(layout.instantiate()),
            Accessor::Constructor(constructor) => {
                let args = coerce_args(args, constructor.params());
                retag(constructor.construct(args)?, type_name)
            }
            _ => return Err(EvalError::instantiation(type_name, "the type is not constructible")),
        };

        for &init in self.list(initializers) {
            let NodeKind::CtorAssignment { member, value, .. } = *self.program.arena().kind(init)
            else {
                continue;
            };
            let value = self.eval(ctx, value).await?;
            self.set_member(init, &object, self.name(member), value)
                .map_err(|e| e.at(self.program.arena().span(init)))?;
        }
        Ok(object)
    }

    /// Await a native call unless the run is cancelled first.
    async fn await_call(&self, ctx: &InvocationContext, call: CallFuture) -> EvalResult {
        let token = ctx.token();
        if token.is_cancelled() {
            return Err(EvalError::cancelled());
        }
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!("native call cancelled");
                Err(EvalError::cancelled())
            }
            result = call => result,
        }
    }
}

/// Widen arguments to the declared parameter types.
fn coerce_args(args: Vec<Value>, params: &[ScriptType]) -> Vec<Value> {
    if args.len() != params.len() {
        return args;
    }
    args.into_iter()
        .zip(params)
        .map(|(arg, param)| arg.coerce_to(param))
        .collect()
}

/// Host constructors tag objects with their own type name. When the type
/// was mounted under an alias, member lookup must find the alias.
fn retag(value: Value, type_name: &str) -> Value {
    match value {
        Value::External(external) if external.type_name() != type_name => Value::External(
            ExternalValue::from_arc(type_name, std::sync::Arc::clone(external.object())),
        ),
        other => other,
    }
}
