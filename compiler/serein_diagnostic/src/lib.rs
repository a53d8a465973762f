//! Diagnostics for Serein.Script.
//!
//! Every stage reports failures through its own error type; each of those
//! converts into a `Diagnostic` carrying:
//! - an `ErrorCode` for searchability
//! - a message (what went wrong)
//! - the span, row and source line text (where it went wrong)
//! - optional notes

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::{ErrorCode, Phase};
