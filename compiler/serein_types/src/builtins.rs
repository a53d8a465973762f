//! Members and methods every script can use on the built-in types.

use serein_ir::ScriptType;

/// Type of a built-in read-only property.
pub fn builtin_property(receiver: &ScriptType, member: &str) -> Option<ScriptType> {
    match (receiver, member) {
        (ScriptType::String | ScriptType::Array(_), "Length")
        | (ScriptType::List(_) | ScriptType::Dictionary(..), "Count") => Some(ScriptType::Int),
        _ => None,
    }
}

/// Parameters and return type of a built-in method with `arity` arguments.
///
/// `ToString()` is available on every type.
pub fn builtin_method(
    receiver: &ScriptType,
    method: &str,
    arity: usize,
) -> Option<(Vec<ScriptType>, ScriptType)> {
    use ScriptType as T;

    let signature = match (receiver, method, arity) {
        (_, "ToString", 0) | (T::String, "ToUpper" | "ToLower" | "Trim", 0) => {
            (vec![], T::String)
        }
        (T::String, "Contains", 1) => (vec![T::String], T::Bool),
        (T::String, "Substring", 1) => (vec![T::Int], T::String),
        (T::String, "Substring", 2) => (vec![T::Int, T::Int], T::String),
        (T::List(element), "Add", 1) => (vec![(**element).clone()], T::Void),
        (T::List(_), "Clear", 0) => (vec![], T::Void),
        (T::List(element), "Contains", 1) => (vec![(**element).clone()], T::Bool),
        (T::Dictionary(key, _), "ContainsKey" | "Remove", 1) => (vec![(**key).clone()], T::Bool),
        _ => return None,
    };
    Some(signature)
}
