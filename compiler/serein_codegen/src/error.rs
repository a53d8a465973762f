//! Source backend failures.

use serein_diagnostic::{Diagnostic, ErrorCode};

/// Why a program could not be emitted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    /// The type table was built for a different program.
    #[error("type table covers {table} nodes but the program has {program}")]
    TableMismatch { table: usize, program: usize },
    /// A name the output needs is not a valid identifier.
    #[error("`{name}` is not a valid {role} name")]
    InvalidName { name: String, role: &'static str },
    /// The program contains a construct with no source form.
    #[error("{0}")]
    Unsupported(String),
}

impl CodegenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::TableMismatch { .. } => ErrorCode::E4001,
            CodegenError::InvalidName { .. } | CodegenError::Unsupported(_) => ErrorCode::E4002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}
