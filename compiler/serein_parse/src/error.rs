//! Parse error types.

use serein_diagnostic::{Diagnostic, ErrorCode};
use serein_ir::{SourceLocation, Span};
use serein_lexer::{LexError, LexErrorKind};

/// A fatal parse error.
///
/// Lexing failures surface through the parser as a `ParseError` with the
/// lexer's E0xxx code and the original `LexErrorKind` attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {}", .location.row)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub location: SourceLocation,
    pub lex: Option<LexErrorKind>,
}

impl ParseError {
    #[cold]
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        location: SourceLocation,
    ) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            location,
            lex: None,
        }
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.location.row
    }

    #[inline]
    pub fn line_text(&self) -> &str {
        &self.location.line_text
    }

    pub fn is_lex_error(&self) -> bool {
        self.lex.is_some()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_span(self.span)
            .with_location(self.location.clone())
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            code: err.code(),
            message: err.kind.to_string(),
            span: err.span,
            location: err.location,
            lex: Some(err.kind),
        }
    }
}
