//! The `check` command: parse and analyze scripts without running them.

use rayon::prelude::*;
use serein::{ScriptEngine, ScriptError, ScriptType};

use super::{error_json, print_json, read_file, render_error, NO_PARAMS};

/// Check every file, in parallel, and report each result in argument
/// order. Exits with status 1 if any file fails.
pub fn check_files(paths: &[String], json: bool) {
    let engine = ScriptEngine::new();
    let sources: Vec<(&str, String)> = paths
        .iter()
        .map(|path| (path.as_str(), read_file(path)))
        .collect();

    let results: Vec<(&str, Result<ScriptType, ScriptError>)> = sources
        .par_iter()
        .map(|(path, source)| (*path, engine.check(source, NO_PARAMS)))
        .collect();

    let failed = results.iter().filter(|(_, result)| result.is_err()).count();
    tracing::debug!(files = results.len(), failed, "checked");

    if json {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|(path, result)| match result {
                Ok(ty) => serde_json::json!({
                    "file": path,
                    "ok": true,
                    "type": ty.to_string(),
                }),
                Err(error) => error_json(path, error),
            })
            .collect();
        print_json(&serde_json::Value::Array(entries));
    } else {
        for (path, result) in &results {
            match result {
                Ok(ty) => println!("{path}: ok ({ty})"),
                Err(error) => eprint!("{}", render_error(path, error)),
            }
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
