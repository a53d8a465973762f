//! Command handlers for the `serein` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! sources and reporting failures live here.

mod check;
mod debug;
mod emit;
mod run;

pub use check::check_files;
pub use debug::{lex_file, parse_file};
pub use emit::{emit_file, EmitOptions};
pub use run::{run_file, RunOptions};

use serein::{ScriptError, ScriptType};

/// No host parameters; CLI scripts are self-contained.
pub(crate) const NO_PARAMS: &[(&str, ScriptType)] = &[];

/// Read a source file, exiting with a message if it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Render a failure the way every command reports it.
pub(crate) fn render_error(path: &str, error: &ScriptError) -> String {
    format!("{path}:\n{}", error.to_diagnostic().render())
}

/// Print a failure and exit with status 1.
pub(crate) fn fail(path: &str, error: &ScriptError) -> ! {
    eprint!("{}", render_error(path, error));
    std::process::exit(1);
}

/// JSON form of a failure for `--json` output.
pub(crate) fn error_json(path: &str, error: &ScriptError) -> serde_json::Value {
    let diagnostic = error.to_diagnostic();
    serde_json::json!({
        "file": path,
        "ok": false,
        "code": diagnostic.code.as_str(),
        "message": diagnostic.message,
        "row": diagnostic.row,
        "column": diagnostic.column,
        "line": diagnostic.line_text,
    })
}

pub(crate) fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: cannot serialize output: {e}");
            std::process::exit(1);
        }
    }
}
