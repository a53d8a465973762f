//! Numeric views and conversions.
//!
//! Conversions follow unchecked host semantics: integral targets wrap,
//! floating-point sources truncate toward zero.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]

use serein_ir::ScriptType;

use super::Value;

impl Value {
    /// Numeric type of the value, `None` for non-numeric values.
    pub fn numeric_type(&self) -> Option<ScriptType> {
        let ty = self.runtime_type();
        ty.is_numeric().then_some(ty)
    }

    /// Integral payload widened to `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Value::SByte(n) => Some(i128::from(n)),
            Value::Byte(n) => Some(i128::from(n)),
            Value::Short(n) => Some(i128::from(n)),
            Value::UShort(n) => Some(i128::from(n)),
            Value::Int(n) => Some(i128::from(n)),
            Value::UInt(n) => Some(i128::from(n)),
            Value::Long(n) => Some(i128::from(n)),
            Value::ULong(n) => Some(i128::from(n)),
            _ => None,
        }
    }

    /// Any numeric payload as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(n) => Some(f64::from(n)),
            Value::Double(n) | Value::Decimal(n) => Some(n),
            _ => self.as_i128().map(|n| n as f64),
        }
    }

    /// An integral value usable as a collection index.
    pub fn as_index(&self) -> Option<i64> {
        self.as_i128().and_then(|n| i64::try_from(n).ok())
    }

    /// Build a value of numeric type `target` from an integer, wrapping.
    pub fn from_i128(target: &ScriptType, n: i128) -> Option<Value> {
        let value = match target {
            ScriptType::SByte => Value::SByte(n as i8),
            ScriptType::Byte => Value::Byte(n as u8),
            ScriptType::Short => Value::Short(n as i16),
            ScriptType::UShort => Value::UShort(n as u16),
            ScriptType::Int => Value::Int(n as i32),
            ScriptType::UInt => Value::UInt(n as u32),
            ScriptType::Long => Value::Long(n as i64),
            ScriptType::ULong => Value::ULong(n as u64),
            ScriptType::Float => Value::Float(n as f32),
            ScriptType::Double => Value::Double(n as f64),
            ScriptType::Decimal => Value::Decimal(n as f64),
            _ => return None,
        };
        Some(value)
    }

    /// Build a value of numeric type `target` from a double.
    pub fn from_f64(target: &ScriptType, n: f64) -> Option<Value> {
        match target {
            ScriptType::Float => Some(Value::Float(n as f32)),
            ScriptType::Double => Some(Value::Double(n)),
            ScriptType::Decimal => Some(Value::Decimal(n)),
            integral if integral.is_integral() => Value::from_i128(integral, n.trunc() as i128),
            _ => None,
        }
    }

    /// Convert a numeric value to another numeric type.
    pub fn convert_numeric(&self, target: &ScriptType) -> Option<Value> {
        if let Some(n) = self.as_i128() {
            return Value::from_i128(target, n);
        }
        let n = match *self {
            Value::Float(n) => f64::from(n),
            Value::Double(n) | Value::Decimal(n) => n,
            _ => return None,
        };
        Value::from_f64(target, n)
    }

    /// Coerce a value into a slot typed `target`: numeric values widen,
    /// everything else passes through unchanged.
    pub fn coerce_to(self, target: &ScriptType) -> Value {
        if target.is_numeric() && self.numeric_type().is_some_and(|ty| ty != *target) {
            if let Some(converted) = self.convert_numeric(target) {
                return converted;
            }
        }
        self
    }

    /// Default value of a slot of type `ty`: zero, `false`, `'\0'` or null.
    pub fn default_for(ty: &ScriptType) -> Value {
        match ty {
            ScriptType::Bool => Value::Bool(false),
            ScriptType::Char => Value::Char('\0'),
            numeric if numeric.is_numeric() => Value::from_i128(numeric, 0).unwrap_or_default(),
            _ => Value::Null,
        }
    }
}
