//! Type errors.

use serein_diagnostic::{Diagnostic, ErrorCode};
use serein_ir::{SourceLocation, Span};

/// A fatal type error. Analysis stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {}", .location.row)]
pub struct TypeError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    pub location: SourceLocation,
}

impl TypeError {
    #[cold]
    pub(crate) fn new(
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        location: SourceLocation,
    ) -> Self {
        TypeError {
            code,
            message: message.into(),
            span,
            location,
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

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_span(self.span)
            .with_location(self.location.clone())
    }
}
