//! Runtime model shared by the type analyzer, the interpreter and the host.
//!
//! - [`Value`]: the tagged union every script value is represented as.
//!   Arrays, lists, maps and records have reference semantics.
//! - [`ExternalType`]: descriptor for a host type, listing the properties,
//!   methods, indexer and constructors a script may use.
//! - [`FunctionRegistry`] / [`TypeRegistry`]: engine-owned mounted
//!   functions and types, safe for concurrent lookup.
//! - [`EvalError`]: the runtime failure type.

mod error;
mod function;
mod host;
mod registry;
mod value;

pub use error::{EvalError, EvalErrorKind, EvalResult};
pub use function::{CallFuture, Handle, MountedFunction};
pub use host::{
    ConstructorDescriptor, ExternalType, IndexerDescriptor, MethodDescriptor, PropertyDescriptor,
};
pub use registry::{FunctionRegistry, Registries, TypeDescriptor, TypeRegistry};
pub use value::{
    ArrayValue, ExternalValue, HostObject, ListValue, MapKey, MapValue, RecordField,
    RecordLayout, RecordValue, Shared, Value,
};

#[cfg(test)]
mod tests;
