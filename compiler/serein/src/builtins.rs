//! Builtin mounted functions.
//!
//! | Name      | Signature            |
//! |-----------|----------------------|
//! | `print`   | `void print(object)` |
//! | `println` | `void println(object)` |
//! | `delay`   | `Task delay(int)`, milliseconds |
//! | `len`     | `int len(object)`    |

use std::time::Duration;

use serein_ir::ScriptType;
use serein_runtime::{EvalError, MountedFunction, Registries, Value};

use crate::output::SharedOutput;

/// Names of the builtins, in registration order.
pub const NAMES: [&str; 4] = ["print", "println", "delay", "len"];

/// Mount every builtin into `registries`. Existing registrations with the
/// same names are replaced.
pub fn install(registries: &Registries, output: &SharedOutput) {
    registries.functions.register("print", print(output.clone()));
    registries.functions.register("println", println(output.clone()));
    registries.functions.register("delay", delay());
    registries.functions.register("len", len());
    tracing::debug!(count = NAMES.len(), "installed builtins");
}

pub fn print(output: SharedOutput) -> MountedFunction {
    MountedFunction::new(vec![ScriptType::Object], ScriptType::Void, move |args| {
        output.print(&display(&args));
        Ok(Value::Null)
    })
}

pub fn println(output: SharedOutput) -> MountedFunction {
    MountedFunction::new(vec![ScriptType::Object], ScriptType::Void, move |args| {
        output.println(&display(&args));
        Ok(Value::Null)
    })
}

/// Suspend the run for the given number of milliseconds. Negative
/// durations do not suspend.
pub fn delay() -> MountedFunction {
    MountedFunction::new_async(vec![ScriptType::Int], ScriptType::Void, |args| async move {
        let millis = match args.first() {
            Some(Value::Int(ms)) => u64::try_from(*ms).unwrap_or(0),
            Some(other) => return Err(EvalError::type_mismatch("int", &other.type_name())),
            None => 0,
        };
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(Value::Null)
    })
}

/// Characters of a string or elements of a collection.
pub fn len() -> MountedFunction {
    MountedFunction::new(vec![ScriptType::Object], ScriptType::Int, |args| {
        let count = match args.first() {
            Some(Value::Str(s)) => s.chars().count(),
            Some(Value::Array(array)) => array.len(),
            Some(Value::List(list)) => list.len(),
            Some(Value::Map(map)) => map.len(),
            Some(Value::Null) | None => return Err(EvalError::null_receiver("len")),
            Some(other) => {
                return Err(EvalError::type_mismatch(
                    "string or collection",
                    &other.type_name(),
                ))
            }
        };
        i32::try_from(count)
            .map(Value::Int)
            .map_err(|_| EvalError::host(format!("length {count} does not fit in an int")))
    })
}

fn display(args: &[Value]) -> String {
    args.first().map(ToString::to_string).unwrap_or_default()
}
