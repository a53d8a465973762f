//! Lexical forms of the generated source: identifiers, literals and type
//! names.

use std::fmt::Write;

use serein_ir::ScriptType;

/// Reserved words of the target language. A script variable with one of
/// these names is emitted with the `@` escape.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// A script name as a target identifier.
pub fn identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("@{name}")
    } else {
        name.to_owned()
    }
}

/// Letters, digits and underscores, not starting with a digit.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Dot-separated identifiers.
pub fn is_qualified_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

/// A regular string literal with escapes.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        push_escaped(&mut out, c, '"');
    }
    out.push('"');
    out
}

/// A verbatim string literal: only `"` needs doubling.
pub fn verbatim_literal(s: &str) -> String {
    format!("@\"{}\"", s.replace('"', "\"\""))
}

pub fn char_literal(c: char) -> String {
    let mut out = String::with_capacity(4);
    out.push('\'');
    push_escaped(&mut out, c, '\'');
    out.push('\'');
    out
}

fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\0' => out.push_str("\\0"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", u32::from(c));
        }
        c => out.push(c),
    }
}

pub fn float_literal(value: f32) -> String {
    if value.is_nan() {
        "float.NaN".to_owned()
    } else if value == f32::INFINITY {
        "float.PositiveInfinity".to_owned()
    } else if value == f32::NEG_INFINITY {
        "float.NegativeInfinity".to_owned()
    } else {
        // Debug formatting keeps a decimal point and full precision.
        format!("{value:?}f")
    }
}

pub fn double_literal(value: f64) -> String {
    if value.is_nan() {
        "double.NaN".to_owned()
    } else if value == f64::INFINITY {
        "double.PositiveInfinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "double.NegativeInfinity".to_owned()
    } else {
        format!("{value:?}d")
    }
}

/// Target spelling of a type.
pub fn type_name(ty: &ScriptType) -> String {
    ty.to_string()
}

/// Return type of the generated method.
pub fn method_return_type(result: &ScriptType, is_async: bool) -> String {
    match (is_async, result) {
        (false, ty) => type_name(ty),
        (true, ScriptType::Void) => "Task".to_owned(),
        (true, ty) => format!("Task<{}>", type_name(ty)),
    }
}
