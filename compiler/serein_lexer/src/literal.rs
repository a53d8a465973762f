//! Literal decoding: escapes, char literals and numbers.

use crate::LexErrorKind;
use serein_ir::TokenKind;

/// Decode one escape sequence (the character after `\`).
fn unescape(c: char) -> Result<char, LexErrorKind> {
    match c {
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        '0' => Ok('\0'),
        '\\' => Ok('\\'),
        '\'' => Ok('\''),
        '"' => Ok('"'),
        other => Err(LexErrorKind::InvalidEscape(other)),
    }
}

/// Process escape sequences in a string body (quotes already stripped).
pub(crate) fn unescape_string(body: &str) -> Result<String, LexErrorKind> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            // The regex guarantees a character follows every backslash.
            let escaped = chars.next().unwrap_or('\\');
            result.push(unescape(escaped)?);
        } else {
            result.push(c);
        }
    }
    Ok(result)
}

/// Decode a char literal body (quotes already stripped).
pub(crate) fn unescape_char(body: &str) -> Result<char, LexErrorKind> {
    let decoded = unescape_string(body)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(LexErrorKind::EmptyChar),
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(LexErrorKind::MultiCharLiteral),
    }
}

/// Classify a number literal.
///
/// - no `.`, no suffix: `int` when it fits, else `long`
/// - `l`/`L`: `long` (a fraction is malformed)
/// - `f`/`F`: `float`; `d`/`D`, or a `.` without suffix: `double`
pub(crate) fn classify_number(text: &str) -> Result<TokenKind, LexErrorKind> {
    let malformed = || LexErrorKind::MalformedNumber(text.to_owned());
    let (digits, suffix) = match text.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            (&text[..text.len() - 1], Some(c.to_ascii_lowercase()))
        }
        _ => (text, None),
    };
    let has_fraction = digits.contains('.');

    match suffix {
        None if !has_fraction => {
            if let Ok(v) = digits.parse::<i32>() {
                Ok(TokenKind::Int(v))
            } else {
                digits
                    .parse::<i64>()
                    .map(TokenKind::Long)
                    .map_err(|_| malformed())
            }
        }
        Some('l') if !has_fraction => digits
            .parse::<i64>()
            .map(TokenKind::Long)
            .map_err(|_| malformed()),
        Some('f') => match digits.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(TokenKind::Float(v.to_bits())),
            _ => Err(malformed()),
        },
        None | Some('d') => match digits.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(TokenKind::Double(v.to_bits())),
            _ => Err(malformed()),
        },
        _ => Err(malformed()),
    }
}
