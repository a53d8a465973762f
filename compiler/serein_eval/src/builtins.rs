//! Members, methods and indexing of the built-in value kinds.
//!
//! Mirrors the analyzer's built-in member table. Strings are indexed and
//! measured by `char`.

use serein_runtime::{EvalError, EvalResult, MapKey, Value};

/// `Length` / `Count`.
pub(crate) fn property(receiver: &Value, member: &str) -> Option<Value> {
    let len = match (receiver, member) {
        (Value::Str(s), "Length") => s.chars().count(),
        (Value::Array(a), "Length") => a.len(),
        (Value::List(l), "Count") => l.len(),
        (Value::Map(m), "Count") => m.len(),
        _ => return None,
    };
    Some(Value::Int(i32::try_from(len).unwrap_or(i32::MAX)))
}

/// Whether `method` with `arity` arguments exists on `receiver`.
pub(crate) fn has_method(receiver: &Value, method: &str, arity: usize) -> bool {
    matches!(
        (receiver, method, arity),
        (_, "ToString", 0)
            | (Value::Str(_), "ToUpper" | "ToLower" | "Trim", 0)
            | (Value::Str(_), "Contains", 1)
            | (Value::Str(_), "Substring", 1 | 2)
            | (Value::List(_), "Add" | "Contains", 1)
            | (Value::List(_), "Clear", 0)
            | (Value::Map(_), "ContainsKey" | "Remove", 1)
    )
}

/// Invoke a built-in method. The caller has checked [`has_method`].
pub(crate) fn call_method(receiver: &Value, method: &str, args: &[Value]) -> EvalResult {
    match (receiver, method, args) {
        (_, "ToString", []) => Ok(Value::string(receiver.to_string())),
        (Value::Str(s), "ToUpper", []) => Ok(Value::string(s.to_uppercase())),
        (Value::Str(s), "ToLower", []) => Ok(Value::string(s.to_lowercase())),
        (Value::Str(s), "Trim", []) => Ok(Value::string(s.trim())),
        (Value::Str(s), "Contains", [needle]) => {
            let needle = needle
                .as_str()
                .ok_or_else(|| EvalError::type_mismatch("string", &needle.type_name()))?;
            Ok(Value::Bool(s.contains(needle)))
        }
        (Value::Str(s), "Substring", [start]) => {
            let start = index_arg(start)?;
            let total = s.chars().count();
            if start > total {
                return Err(EvalError::index_out_of_range(to_i64(start), total));
            }
            Ok(Value::string(s.chars().skip(start).collect::<String>()))
        }
        (Value::Str(s), "Substring", [start, len]) => {
            let start = index_arg(start)?;
            let len = index_arg(len)?;
            let total = s.chars().count();
            if start.saturating_add(len) > total {
                return Err(EvalError::index_out_of_range(
                    to_i64(start.saturating_add(len)),
                    total,
                ));
            }
            Ok(Value::string(
                s.chars().skip(start).take(len).collect::<String>(),
            ))
        }
        (Value::List(list), "Add", [item]) => {
            list.push(item.clone().coerce_to(list.element()));
            Ok(Value::Null)
        }
        (Value::List(list), "Clear", []) => {
            list.clear();
            Ok(Value::Null)
        }
        (Value::List(list), "Contains", [item]) => Ok(Value::Bool(list.contains(item))),
        (Value::Map(map), "ContainsKey", [key]) => {
            Ok(Value::Bool(map.contains_key(&map_key(key)?)))
        }
        (Value::Map(map), "Remove", [key]) => Ok(Value::Bool(map.remove(&map_key(key)?).is_some())),
        _ => Err(EvalError::missing_method(&receiver.type_name(), method)),
    }
}

/// `receiver[index]` for arrays, lists, dictionaries and strings.
/// `None` when the receiver is not a built-in collection.
pub(crate) fn get_index(receiver: &Value, index: &Value) -> Option<EvalResult> {
    let result = match receiver {
        Value::Array(array) => {
            position(index, array.len()).and_then(|i| element(array.get(i), index, array.len()))
        }
        Value::List(list) => {
            position(index, list.len()).and_then(|i| element(list.get(i), index, list.len()))
        }
        Value::Map(map) => map_key(index)
            .and_then(|key| map.get(&key).ok_or_else(|| EvalError::missing_key(index))),
        Value::Str(s) => {
            let len = s.chars().count();
            position(index, len).and_then(|i| {
                s.chars()
                    .nth(i)
                    .map(Value::Char)
                    .ok_or_else(|| EvalError::index_out_of_range(to_i64(i), len))
            })
        }
        _ => return None,
    };
    Some(result)
}

/// `receiver[index] = value` for arrays, lists and dictionaries.
/// `None` when the receiver is not a writable built-in collection.
pub(crate) fn set_index(
    receiver: &Value,
    index: &Value,
    value: Value,
) -> Option<Result<(), EvalError>> {
    let result = match receiver {
        Value::Array(array) => position(index, array.len()).and_then(|i| {
            let value = value.coerce_to(array.element());
            store(array.set(i, value), index, array.len())
        }),
        Value::List(list) => position(index, list.len()).and_then(|i| {
            let value = value.coerce_to(list.element());
            store(list.set(i, value), index, list.len())
        }),
        Value::Map(map) => map_key(index).map(|key| {
            map.insert(key, value.coerce_to(map.value_type()));
        }),
        _ => return None,
    };
    Some(result)
}

fn position(index: &Value, len: usize) -> Result<usize, EvalError> {
    let raw = index
        .as_index()
        .ok_or_else(|| EvalError::type_mismatch("an integral index", &index.type_name()))?;
    usize::try_from(raw)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| EvalError::index_out_of_range(raw, len))
}

fn element(item: Option<Value>, index: &Value, len: usize) -> EvalResult {
    item.ok_or_else(|| EvalError::index_out_of_range(index.as_index().unwrap_or(-1), len))
}

fn store(stored: bool, index: &Value, len: usize) -> Result<(), EvalError> {
    if stored {
        Ok(())
    } else {
        Err(EvalError::index_out_of_range(index.as_index().unwrap_or(-1), len))
    }
}

fn index_arg(value: &Value) -> Result<usize, EvalError> {
    value
        .as_index()
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| EvalError::type_mismatch("a non-negative int", &value.to_string()))
}

fn map_key(value: &Value) -> Result<MapKey, EvalError> {
    MapKey::from_value(value)
        .ok_or_else(|| EvalError::type_mismatch("a dictionary key", &value.type_name()))
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
