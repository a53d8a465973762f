//! Runtime values.
//!
//! Primitives are stored inline. Arrays, lists, maps and records share their
//! storage through [`Shared`], so assigning one to another variable aliases
//! it, the way reference types behave on the host side.

mod collection;
mod external;
mod numeric;
mod record;

use std::fmt;
use std::sync::Arc;

use serein_ir::ScriptType;

pub use collection::{ArrayValue, ListValue, MapKey, MapValue};
pub use external::{ExternalValue, HostObject};
pub use record::{RecordField, RecordLayout, RecordValue};

/// Shared, interior-mutable storage for reference values.
pub type Shared<T> = Arc<parking_lot::RwLock<T>>;

pub(crate) fn shared<T>(value: T) -> Shared<T> {
    Arc::new(parking_lot::RwLock::new(value))
}

/// A script value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Str(Arc<str>),
    SByte(i8),
    Byte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    /// Decimal, carried as a double.
    Decimal(f64),
    Array(ArrayValue),
    List(ListValue),
    Map(MapValue),
    Record(RecordValue),
    External(ExternalValue),
}

impl Value {
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Arc::from(s.as_ref()))
    }

    pub fn array(element: ScriptType, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(element, items))
    }

    pub fn list(element: ScriptType, items: Vec<Value>) -> Self {
        Value::List(ListValue::new(element, items))
    }

    pub fn map(
        key: ScriptType,
        value: ScriptType,
        entries: impl IntoIterator<Item = (MapKey, Value)>,
    ) -> Self {
        Value::Map(MapValue::new(key, value, entries))
    }

    pub fn external<T: HostObject>(type_name: &str, object: T) -> Self {
        Value::External(ExternalValue::new(type_name, object))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_external(&self) -> Option<&ExternalValue> {
        match self {
            Value::External(e) => Some(e),
            _ => None,
        }
    }

    /// The type of the value as it exists at run time. `null` reports
    /// `object`.
    pub fn runtime_type(&self) -> ScriptType {
        match self {
            Value::Null => ScriptType::Object,
            Value::Bool(_) => ScriptType::Bool,
            Value::Char(_) => ScriptType::Char,
            Value::Str(_) => ScriptType::String,
            Value::SByte(_) => ScriptType::SByte,
            Value::Byte(_) => ScriptType::Byte,
            Value::Short(_) => ScriptType::Short,
            Value::UShort(_) => ScriptType::UShort,
            Value::Int(_) => ScriptType::Int,
            Value::UInt(_) => ScriptType::UInt,
            Value::Long(_) => ScriptType::Long,
            Value::ULong(_) => ScriptType::ULong,
            Value::Float(_) => ScriptType::Float,
            Value::Double(_) => ScriptType::Double,
            Value::Decimal(_) => ScriptType::Decimal,
            Value::Array(a) => ScriptType::array(a.element().clone()),
            Value::List(l) => ScriptType::list(l.element().clone()),
            Value::Map(m) => ScriptType::dictionary(m.key_type().clone(), m.value_type().clone()),
            Value::Record(r) => ScriptType::Named(Arc::clone(r.layout().name_arc())),
            Value::External(e) => ScriptType::Named(Arc::clone(e.type_name_arc())),
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            other => other.runtime_type().to_string(),
        }
    }

    /// Reference identity for shared values; `false` for primitives.
    pub fn same_reference(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
            (Value::External(a), Value::External(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Nesting depth past which shared values render as a placeholder.
const MAX_RENDER_DEPTH: usize = 64;

/// Shared storages currently being rendered, outermost first.
///
/// A value that contains itself would otherwise recurse until the stack
/// overflows; a storage already on the path renders as `[...]`, `{...}`
/// or `Name { ... }` instead.
#[derive(Default)]
struct RenderPath {
    open: Vec<*const ()>,
}

impl RenderPath {
    fn enter(&mut self, storage: *const ()) -> bool {
        if self.open.len() >= MAX_RENDER_DEPTH || self.open.contains(&storage) {
            return false;
        }
        self.open.push(storage);
        true
    }

    fn leave(&mut self) {
        self.open.pop();
    }
}

#[derive(Clone, Copy)]
enum Style {
    Display,
    Debug,
}

fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    style: Style,
    path: &mut RenderPath,
) -> fmt::Result {
    let storage = match value {
        Value::Array(a) => a.storage_ptr(),
        Value::List(l) => l.storage_ptr(),
        Value::Map(m) => m.storage_ptr(),
        Value::Record(r) => r.storage_ptr(),
        _ => return write_scalar(f, value, style),
    };
    if !path.enter(storage) {
        return match (value, style) {
            (Value::Map(_), Style::Display) => f.write_str("{...}"),
            (Value::Record(r), Style::Display) => write!(f, "{} {{ ... }}", r.layout().name()),
            (_, Style::Display) => f.write_str("[...]"),
            (_, Style::Debug) => f.write_str(".."),
        };
    }
    let result = write_shared(f, value, style, path);
    path.leave();
    result
}

/// Join the rendered form of `items` with `, `.
fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[Value],
    style: Style,
    path: &mut RenderPath,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_value(f, item, style, path)?;
    }
    Ok(())
}

fn write_shared(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    style: Style,
    path: &mut RenderPath,
) -> fmt::Result {
    match (value, style) {
        (Value::Array(a), Style::Display) => {
            f.write_str("[")?;
            write_joined(f, &a.read(), style, path)?;
            f.write_str("]")
        }
        (Value::List(l), Style::Display) => {
            f.write_str("[")?;
            write_joined(f, &l.read(), style, path)?;
            f.write_str("]")
        }
        (Value::Array(a), Style::Debug) => {
            write!(f, "Array<{}>([", a.element())?;
            write_joined(f, &a.read(), style, path)?;
            f.write_str("])")
        }
        (Value::List(l), Style::Debug) => {
            write!(f, "List<{}>([", l.element())?;
            write_joined(f, &l.read(), style, path)?;
            f.write_str("])")
        }
        (Value::Map(m), _) => {
            f.write_str(if matches!(style, Style::Debug) { "Map({" } else { "{" })?;
            for (i, (k, v)) in m.read().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match style {
                    Style::Display => write!(f, "{k}: ")?,
                    Style::Debug => write!(f, "{k:?}: ")?,
                }
                write_value(f, v, style, path)?;
            }
            f.write_str(if matches!(style, Style::Debug) { "})" } else { "}" })
        }
        (Value::Record(r), Style::Display) => {
            write!(f, "{} {{ ", r.layout().name())?;
            let values = r.read();
            for (i, (field, value)) in r.layout().fields().iter().zip(values.iter()).enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{} = ", field.name)?;
                write_value(f, value, style, path)?;
            }
            f.write_str(" }")
        }
        (Value::Record(r), Style::Debug) => {
            write!(f, "Record({}, [", r.layout().name())?;
            write_joined(f, &r.read(), style, path)?;
            f.write_str("])")
        }
        (other, _) => write_scalar(f, other, style),
    }
}

fn write_scalar(f: &mut fmt::Formatter<'_>, value: &Value, style: Style) -> fmt::Result {
    match style {
        Style::Display => match value {
            Value::Null => f.write_str("null"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => f.write_str(s),
            Value::SByte(n) => write!(f, "{n}"),
            Value::Byte(n) => write!(f, "{n}"),
            Value::Short(n) => write!(f, "{n}"),
            Value::UShort(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::ULong(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Double(n) | Value::Decimal(n) => write!(f, "{n}"),
            Value::External(e) => f.write_str(e.type_name()),
            Value::Array(_) | Value::List(_) | Value::Map(_) | Value::Record(_) => Ok(()),
        },
        Style::Debug => match value {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::SByte(n) => write!(f, "SByte({n})"),
            Value::Byte(n) => write!(f, "Byte({n})"),
            Value::Short(n) => write!(f, "Short({n})"),
            Value::UShort(n) => write!(f, "UShort({n})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::UInt(n) => write!(f, "UInt({n})"),
            Value::Long(n) => write!(f, "Long({n})"),
            Value::ULong(n) => write!(f, "ULong({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Double(n) => write!(f, "Double({n:?})"),
            Value::Decimal(n) => write!(f, "Decimal({n:?})"),
            Value::External(e) => write!(f, "External({e:?})"),
            Value::Array(_) | Value::List(_) | Value::Map(_) | Value::Record(_) => Ok(()),
        },
    }
}

/// Host-style `ToString()` rendering.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, Style::Display, &mut RenderPath::default())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, Style::Debug, &mut RenderPath::default())
    }
}

/// Structural equality for primitives and contents; shared values compare
/// by identity first.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.same_reference(other) {
            return true;
        }
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::SByte(a), Value::SByte(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::UShort(a), Value::UShort(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::ULong(a), Value::ULong(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) | (Value::Decimal(a), Value::Decimal(b)) => {
                a == b
            }
            (Value::Array(a), Value::Array(b)) => *a.read() == *b.read(),
            (Value::List(a), Value::List(b)) => *a.read() == *b.read(),
            (Value::Map(a), Value::Map(b)) => *a.read() == *b.read(),
            (Value::Record(a), Value::Record(b)) => {
                a.layout().name() == b.layout().name() && *a.read() == *b.read()
            }
            _ => false,
        }
    }
}
