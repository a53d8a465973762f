//! The `emit` command: transpile a script to a C# method.

use serein::{CodegenOptions, ScriptEngine};

use super::{error_json, fail, print_json, read_file, NO_PARAMS};

#[derive(Clone, Debug)]
pub struct EmitOptions {
    pub method_name: String,
    pub codegen: CodegenOptions,
    /// Print the whole `CompiledMethod` as JSON instead of the source.
    pub json: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            method_name: "Run".to_owned(),
            codegen: CodegenOptions::default(),
            json: false,
        }
    }
}

pub fn emit_file(path: &str, options: &EmitOptions) {
    let source = read_file(path);
    let engine = ScriptEngine::new();
    let compiled = engine
        .compile(&source, NO_PARAMS)
        .and_then(|script| script.transpile_with(&options.method_name, &options.codegen));

    match compiled {
        Ok(method) if options.json => match serde_json::to_value(&method) {
            Ok(value) => print_json(&value),
            Err(e) => {
                eprintln!("error: cannot serialize output: {e}");
                std::process::exit(1);
            }
        },
        Ok(method) => print!("{}", method.source),
        Err(error) if options.json => {
            print_json(&error_json(path, &error));
            std::process::exit(1);
        }
        Err(error) => fail(path, &error),
    }
}
