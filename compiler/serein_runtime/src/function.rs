//! Native call handles and mounted functions.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serein_ir::ScriptType;

use crate::{EvalError, Value};

/// Future returned by every native call. Synchronous handles return a ready
/// future so the interpreter awaits all calls the same way.
pub type CallFuture = Pin<Box<dyn Future<Output = Result<Value, EvalError>> + Send>>;

/// A native callable: receiver (null for free functions) and arguments.
pub type Handle = Arc<dyn Fn(Value, Vec<Value>) -> CallFuture + Send + Sync>;

pub(crate) fn sync_handle<F>(f: F) -> Handle
where
    F: Fn(&Value, Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    Arc::new(move |receiver, args| {
        let result = f(&receiver, args);
        Box::pin(std::future::ready(result))
    })
}

pub(crate) fn async_handle<F, Fut>(f: F) -> Handle
where
    F: Fn(Value, Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, EvalError>> + Send + 'static,
{
    Arc::new(move |receiver, args| Box::pin(f(receiver, args)))
}

/// A host function callable from scripts by name.
#[derive(Clone)]
pub struct MountedFunction {
    params: Vec<ScriptType>,
    ret: ScriptType,
    handle: Handle,
}

impl MountedFunction {
    /// A synchronous function.
    pub fn new<F>(params: Vec<ScriptType>, ret: ScriptType, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        MountedFunction {
            params,
            ret,
            handle: sync_handle(move |_, args| f(args)),
        }
    }

    /// An asynchronous function. Its declared return type is `Task` when
    /// `result` is `Void`, otherwise `Task<result>`.
    pub fn new_async<F, Fut>(params: Vec<ScriptType>, result: ScriptType, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, EvalError>> + Send + 'static,
    {
        let ret = match result {
            ScriptType::Void => ScriptType::task(None),
            other => ScriptType::task(Some(other)),
        };
        MountedFunction {
            params,
            ret,
            handle: async_handle(move |_, args| f(args)),
        }
    }

    pub fn params(&self) -> &[ScriptType] {
        &self.params
    }

    /// Declared return type, `Task`/`Task<T>` for asynchronous functions.
    pub fn return_type(&self) -> &ScriptType {
        &self.ret
    }

    pub fn is_async(&self) -> bool {
        matches!(self.ret, ScriptType::Task(_))
    }

    pub fn call(&self, args: Vec<Value>) -> CallFuture {
        (self.handle)(Value::Null, args)
    }
}

impl fmt::Debug for MountedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedFunction")
            .field("params", &self.params)
            .field("ret", &self.ret)
            .finish_non_exhaustive()
    }
}
