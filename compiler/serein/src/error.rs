//! Engine-level errors.

use serein_codegen::CodegenError;
use serein_diagnostic::{Diagnostic, ErrorCode};
use serein_ir::{Program, SourceLocation, Span};
use serein_lexer::LexError;
use serein_parse::ParseError;
use serein_runtime::EvalError;
use serein_types::TypeError;

/// Any failure along compile, run or transpile.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Type(#[from] TypeError),
    /// A failure while running. `location` is known once the failure has
    /// been tied to the program it came from.
    #[error("{error}")]
    Runtime {
        error: EvalError,
        location: Option<SourceLocation>,
    },
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl From<EvalError> for ScriptError {
    fn from(error: EvalError) -> Self {
        ScriptError::Runtime {
            error,
            location: None,
        }
    }
}

impl ScriptError {
    /// A runtime failure located in `program`.
    #[cold]
    pub(crate) fn runtime(error: EvalError, program: &Program) -> Self {
        let location = (error.span != Span::DUMMY).then(|| program.locate(error.span));
        ScriptError::Runtime { error, location }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScriptError::Lex(e) => e.code(),
            ScriptError::Parse(e) => e.code,
            ScriptError::Type(e) => e.code,
            ScriptError::Runtime { error, .. } => error.code(),
            ScriptError::Codegen(e) => e.code(),
        }
    }

    /// 1-based row of the failing line; 0 when unknown.
    pub fn row(&self) -> u32 {
        match self {
            ScriptError::Lex(e) => e.row(),
            ScriptError::Parse(e) => e.row(),
            ScriptError::Type(e) => e.row(),
            ScriptError::Runtime { location, .. } => location.as_ref().map_or(0, |l| l.row),
            ScriptError::Codegen(_) => 0,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScriptError::Lex(e) => e.to_diagnostic(),
            ScriptError::Parse(e) => e.to_diagnostic(),
            ScriptError::Type(e) => e.to_diagnostic(),
            ScriptError::Runtime { error, location } => {
                let diagnostic = Diagnostic::error(error.code())
                    .with_message(error.message.clone())
                    .with_span(error.span);
                match location {
                    Some(location) => diagnostic.with_location(location.clone()),
                    None => diagnostic,
                }
            }
            ScriptError::Codegen(e) => e.to_diagnostic(),
        }
    }
}
