//! Lexer errors.

use serein_diagnostic::{Diagnostic, ErrorCode};
use serein_ir::{SourceLocation, Span};

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated raw string literal")]
    UnterminatedRawString,
    #[error("unterminated char literal")]
    UnterminatedChar,
    #[error("empty char literal")]
    EmptyChar,
    #[error("char literal contains more than one character")]
    MultiCharLiteral,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("malformed number literal `{0}`")]
    MalformedNumber(String),
    #[error("unrecognized character `{0}`")]
    UnexpectedCharacter(char),
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnexpectedCharacter(_) => ErrorCode::E0002,
            LexErrorKind::MalformedNumber(_) => ErrorCode::E0003,
            LexErrorKind::UnterminatedChar => ErrorCode::E0004,
            LexErrorKind::InvalidEscape(_) => ErrorCode::E0005,
            LexErrorKind::UnterminatedRawString => ErrorCode::E0006,
            LexErrorKind::EmptyChar | LexErrorKind::MultiCharLiteral => ErrorCode::E0007,
        }
    }
}

/// A fatal lexing error with its location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}", .location.row)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub location: SourceLocation,
}

impl LexError {
    #[cold]
    pub(crate) fn new(kind: LexErrorKind, span: Span, location: SourceLocation) -> Self {
        LexError {
            kind,
            span,
            location,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.location.row
    }

    #[inline]
    pub fn line_text(&self) -> &str {
        &self.location.line_text
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_span(self.span)
            .with_location(self.location.clone())
    }
}
