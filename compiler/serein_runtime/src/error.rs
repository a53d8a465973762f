//! Runtime failures.
//!
//! Factory functions are the public API: they fill in both the kind and a
//! message. The span is attached by the interpreter at the failing node.

use crate::Value;
use serein_diagnostic::{Diagnostic, ErrorCode};
use serein_ir::{BinaryOp, Program, Span};

/// Result of evaluating a node.
pub type EvalResult = Result<Value, EvalError>;

/// Category of a runtime failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    NullOperand,
    DivideByZero,
    NonBoolCondition,
    MissingMember,
    MissingMethod,
    UnknownFunction,
    NullReceiver,
    IndexOutOfRange,
    TypeMismatch,
    Cancelled,
    HostFailure,
    Instantiation,
}

impl EvalErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            EvalErrorKind::NullOperand => ErrorCode::E3001,
            EvalErrorKind::DivideByZero => ErrorCode::E3002,
            EvalErrorKind::NonBoolCondition => ErrorCode::E3003,
            EvalErrorKind::MissingMember => ErrorCode::E3004,
            EvalErrorKind::MissingMethod => ErrorCode::E3005,
            EvalErrorKind::UnknownFunction => ErrorCode::E3006,
            EvalErrorKind::NullReceiver => ErrorCode::E3007,
            EvalErrorKind::IndexOutOfRange => ErrorCode::E3008,
            EvalErrorKind::TypeMismatch => ErrorCode::E3009,
            EvalErrorKind::Cancelled => ErrorCode::E3010,
            EvalErrorKind::HostFailure => ErrorCode::E3011,
            EvalErrorKind::Instantiation => ErrorCode::E3012,
        }
    }
}

/// A runtime failure, fatal to the current run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Span of the failing node; `Span::DUMMY` until the interpreter
    /// attaches one.
    pub span: Span,
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            span: Span::DUMMY,
        }
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        if self.span == Span::DUMMY {
            self.span = span;
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[cold]
    pub fn null_operand(op: BinaryOp) -> Self {
        Self::new(
            EvalErrorKind::NullOperand,
            format!("null operand in `{op}` expression"),
        )
    }

    #[cold]
    pub fn division_by_zero() -> Self {
        Self::new(EvalErrorKind::DivideByZero, "attempted to divide by zero")
    }

    #[cold]
    pub fn non_bool_condition(found: &Value) -> Self {
        Self::new(
            EvalErrorKind::NonBoolCondition,
            format!("condition must evaluate to bool, found {}", found.type_name()),
        )
    }

    #[cold]
    pub fn missing_member(type_name: &str, member: &str) -> Self {
        Self::new(
            EvalErrorKind::MissingMember,
            format!("type `{type_name}` has no member `{member}`"),
        )
    }

    #[cold]
    pub fn missing_method(type_name: &str, method: &str) -> Self {
        Self::new(
            EvalErrorKind::MissingMethod,
            format!("type `{type_name}` has no method `{method}` matching the arguments"),
        )
    }

    #[cold]
    pub fn unknown_function(name: &str) -> Self {
        Self::new(
            EvalErrorKind::UnknownFunction,
            format!("no mounted function named `{name}`"),
        )
    }

    #[cold]
    pub fn null_receiver(member: &str) -> Self {
        Self::new(
            EvalErrorKind::NullReceiver,
            format!("cannot access `{member}` on a null value"),
        )
    }

    #[cold]
    pub fn index_out_of_range(index: i64, len: usize) -> Self {
        Self::new(
            EvalErrorKind::IndexOutOfRange,
            format!("index {index} is out of range for length {len}"),
        )
    }

    #[cold]
    pub fn missing_key(key: &Value) -> Self {
        Self::new(
            EvalErrorKind::IndexOutOfRange,
            format!("key `{key}` was not present in the dictionary"),
        )
    }

    #[cold]
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Self::new(
            EvalErrorKind::TypeMismatch,
            format!("expected {expected}, found {found}"),
        )
    }

    #[cold]
    pub fn invalid_operands(op: BinaryOp, left: &Value, right: &Value) -> Self {
        Self::new(
            EvalErrorKind::TypeMismatch,
            format!(
                "operator `{op}` cannot be applied to {} and {}",
                left.type_name(),
                right.type_name()
            ),
        )
    }

    #[cold]
    pub fn cancelled() -> Self {
        Self::new(EvalErrorKind::Cancelled, "the script run was cancelled")
    }

    #[cold]
    pub fn host(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::HostFailure, message)
    }

    #[cold]
    pub fn instantiation(type_name: &str, reason: &str) -> Self {
        Self::new(
            EvalErrorKind::Instantiation,
            format!("cannot create an instance of `{type_name}`: {reason}"),
        )
    }

    /// Render against the program the failing node belongs to.
    pub fn to_diagnostic(&self, program: &Program) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.message.clone())
            .with_span(self.span);
        if self.span == Span::DUMMY {
            diagnostic
        } else {
            diagnostic.with_location(program.locate(self.span))
        }
    }
}
