use std::fmt;
use std::fmt::Write as _;

use serein_ir::{SourceLocation, Span};

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A located, renderable error report.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    /// 1-based row; 0 when the location is unknown.
    pub row: u32,
    /// 1-based column; 0 when the location is unknown.
    pub column: u32,
    pub line_text: String,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            span: Span::DUMMY,
            row: 0,
            column: 0,
            line_text: String::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.row = location.row;
        self.column = location.column;
        self.line_text = location.line_text;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render as a terminal snippet:
    ///
    /// ```text
    /// error[E2004]: unknown member `Nmae` on `Person`
    ///  --> 2:7
    ///   |
    /// 2 | x = p.Nmae;
    ///   |       ^^^^
    ///   = note: ...
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}[{}]: {}", self.severity, self.code, self.message);
        if self.row == 0 {
            for note in &self.notes {
                let _ = writeln!(out, " = note: {note}");
            }
            return out;
        }

        let gutter = self.row.to_string().len();
        let pad = " ".repeat(gutter);
        let _ = writeln!(out, "{pad}--> {}:{}", self.row, self.column);
        let _ = writeln!(out, "{pad} |");
        let _ = writeln!(out, "{} | {}", self.row, self.line_text);

        let line_chars = self.line_text.chars().count();
        let start = (self.column.max(1) - 1) as usize;
        if start <= line_chars {
            let width = (self.span.len() as usize)
                .min(line_chars.saturating_sub(start))
                .max(1);
            let _ = writeln!(
                out,
                "{pad} | {}{}",
                " ".repeat(start),
                "^".repeat(width)
            );
        }
        for note in &self.notes {
            let _ = writeln!(out, "{pad} = note: {note}");
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if self.row > 0 {
            write!(f, " (line {}: {})", self.row, self.line_text.trim())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn located() -> Diagnostic {
        Diagnostic::error(ErrorCode::E2004)
            .with_message("unknown member `Nmae` on `Person`")
            .with_span(Span::new(13, 17))
            .with_location(SourceLocation {
                row: 2,
                column: 7,
                line_text: "x = p.Nmae;".to_owned(),
            })
    }

    #[test]
    fn test_render_snippet() {
        let expected = "\
error[E2004]: unknown member `Nmae` on `Person`
 --> 2:7
  |
2 | x = p.Nmae;
  |       ^^^^
";
        assert_eq!(located().render(), expected);
    }

    #[test]
    fn test_render_with_note() {
        let rendered = located().with_note("did you mean `Name`?").render();
        assert!(rendered.ends_with("  = note: did you mean `Name`?\n"));
    }

    #[test]
    fn test_render_without_location() {
        let rendered = Diagnostic::error(ErrorCode::E4001)
            .with_message("type table does not belong to this program")
            .render();
        assert_eq!(
            rendered,
            "error[E4001]: type table does not belong to this program\n"
        );
    }

    #[test]
    fn test_display_is_single_line() {
        assert_eq!(
            located().to_string(),
            "error[E2004]: unknown member `Nmae` on `Person` (line 2: x = p.Nmae;)"
        );
    }
}
