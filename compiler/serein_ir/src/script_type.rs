//! Script-level type descriptors.
//!
//! `ScriptType` is what the analyzer writes into the type table, what the
//! source backend spells out as C# type names, and what host registrations
//! use to describe parameters and return values.

use std::fmt;
use std::sync::Arc;

/// A script type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptType {
    Void,
    Object,
    Bool,
    Char,
    String,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    Array(Box<ScriptType>),
    List(Box<ScriptType>),
    Dictionary(Box<ScriptType>, Box<ScriptType>),
    /// `Task` (`None`) or `Task<T>`.
    Task(Option<Box<ScriptType>>),
    /// A registered host type or a script-declared record type.
    Named(Arc<str>),
}

impl ScriptType {
    pub fn array(element: ScriptType) -> Self {
        ScriptType::Array(Box::new(element))
    }

    pub fn list(element: ScriptType) -> Self {
        ScriptType::List(Box::new(element))
    }

    pub fn dictionary(key: ScriptType, value: ScriptType) -> Self {
        ScriptType::Dictionary(Box::new(key), Box::new(value))
    }

    pub fn task(result: Option<ScriptType>) -> Self {
        ScriptType::Task(result.map(Box::new))
    }

    pub fn named(name: &str) -> Self {
        ScriptType::Named(Arc::from(name))
    }

    /// Position on the promotion ladder, `sbyte` lowest, `decimal` highest.
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            ScriptType::SByte => Some(1),
            ScriptType::Byte => Some(2),
            ScriptType::Short => Some(3),
            ScriptType::UShort => Some(4),
            ScriptType::Int => Some(5),
            ScriptType::UInt => Some(6),
            ScriptType::Long => Some(7),
            ScriptType::ULong => Some(8),
            ScriptType::Float => Some(9),
            ScriptType::Double => Some(10),
            ScriptType::Decimal => Some(11),
            _ => None,
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    pub fn is_integral(&self) -> bool {
        self.numeric_rank().is_some_and(|r| r <= 8)
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            ScriptType::Byte | ScriptType::UShort | ScriptType::UInt | ScriptType::ULong
        )
    }

    pub fn is_signed_integral(&self) -> bool {
        matches!(
            self,
            ScriptType::SByte | ScriptType::Short | ScriptType::Int | ScriptType::Long
        )
    }

    /// Types whose values may be `null`.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ScriptType::Object
                | ScriptType::String
                | ScriptType::Array(_)
                | ScriptType::List(_)
                | ScriptType::Dictionary(..)
                | ScriptType::Named(_)
        )
    }

    /// The wider of two numeric types, or `None` if either is not numeric.
    pub fn promote(a: &ScriptType, b: &ScriptType) -> Option<ScriptType> {
        let ra = a.numeric_rank()?;
        let rb = b.numeric_rank()?;
        Some(if ra >= rb { a.clone() } else { b.clone() })
    }

    /// Whether a value of type `value` may be stored where `self` is expected.
    ///
    /// Covers identity, `object` targets, implicit numeric widening and
    /// array/list covariance to `object` elements. Null literals are the
    /// caller's concern: they carry type `object`.
    pub fn accepts(&self, value: &ScriptType) -> bool {
        if self == value || *self == ScriptType::Object {
            return true;
        }
        if let (Some(target), Some(source)) = (self.numeric_rank(), value.numeric_rank()) {
            return source < target && !(value.is_signed_integral() && self.is_unsigned());
        }
        match (self, value) {
            (ScriptType::Array(t), ScriptType::Array(_))
            | (ScriptType::List(t), ScriptType::List(_)) => **t == ScriptType::Object,
            _ => false,
        }
    }

    /// Element type of arrays and lists.
    pub fn element_type(&self) -> Option<&ScriptType> {
        match self {
            ScriptType::Array(t) | ScriptType::List(t) => Some(t),
            _ => None,
        }
    }

    /// The awaited result of a `Task` type: `void` or `T`.
    pub fn task_result(&self) -> Option<ScriptType> {
        match self {
            ScriptType::Task(None) => Some(ScriptType::Void),
            ScriptType::Task(Some(t)) => Some((**t).clone()),
            _ => None,
        }
    }

    /// Resolve a primitive type alias: C# keywords, CLR names with or
    /// without the `System.` prefix.
    pub fn primitive(name: &str) -> Option<ScriptType> {
        let bare = name.strip_prefix("System.").unwrap_or(name);
        let ty = match bare {
            "void" | "Void" => ScriptType::Void,
            "object" | "Object" => ScriptType::Object,
            "bool" | "Boolean" => ScriptType::Bool,
            "char" | "Char" => ScriptType::Char,
            "string" | "String" => ScriptType::String,
            "sbyte" | "SByte" => ScriptType::SByte,
            "byte" | "Byte" => ScriptType::Byte,
            "short" | "Int16" => ScriptType::Short,
            "ushort" | "UInt16" => ScriptType::UShort,
            "int" | "Int32" => ScriptType::Int,
            "uint" | "UInt32" => ScriptType::UInt,
            "long" | "Int64" => ScriptType::Long,
            "ulong" | "UInt64" => ScriptType::ULong,
            "float" | "Single" => ScriptType::Float,
            "double" | "Double" => ScriptType::Double,
            "decimal" | "Decimal" => ScriptType::Decimal,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptType::Void => f.write_str("void"),
            ScriptType::Object => f.write_str("object"),
            ScriptType::Bool => f.write_str("bool"),
            ScriptType::Char => f.write_str("char"),
            ScriptType::String => f.write_str("string"),
            ScriptType::SByte => f.write_str("sbyte"),
            ScriptType::Byte => f.write_str("byte"),
            ScriptType::Short => f.write_str("short"),
            ScriptType::UShort => f.write_str("ushort"),
            ScriptType::Int => f.write_str("int"),
            ScriptType::UInt => f.write_str("uint"),
            ScriptType::Long => f.write_str("long"),
            ScriptType::ULong => f.write_str("ulong"),
            ScriptType::Float => f.write_str("float"),
            ScriptType::Double => f.write_str("double"),
            ScriptType::Decimal => f.write_str("decimal"),
            ScriptType::Array(t) => write!(f, "{t}[]"),
            ScriptType::List(t) => write!(f, "List<{t}>"),
            ScriptType::Dictionary(k, v) => write!(f, "Dictionary<{k}, {v}>"),
            ScriptType::Task(None) => f.write_str("Task"),
            ScriptType::Task(Some(t)) => write!(f, "Task<{t}>"),
            ScriptType::Named(name) => f.write_str(name),
        }
    }
}
