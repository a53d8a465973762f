//! The `run` command: compile and evaluate a script.

use serein::{ScriptEngine, ScriptType};

use super::{error_json, fail, print_json, read_file, NO_PARAMS};

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub strict_null: bool,
    pub json: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            strict_null: true,
            json: false,
        }
    }
}

/// Run a script file and print its result.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let engine = ScriptEngine::builder()
        .strict_null(options.strict_null)
        .build();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: cannot start the async runtime: {e}");
            std::process::exit(1);
        }
    };

    let outcome = engine.compile(&source, NO_PARAMS).and_then(|script| {
        let value = runtime.block_on(script.run(Vec::<(&str, serein::Value)>::new()))?;
        Ok((script.return_type().clone(), value))
    });

    match outcome {
        Ok((ty, value)) if options.json => print_json(&serde_json::json!({
            "file": path,
            "ok": true,
            "type": ty.to_string(),
            "value": value.to_string(),
        })),
        Ok((ScriptType::Void, _)) => {}
        Ok((_, value)) => println!("{value}"),
        Err(error) if options.json => {
            print_json(&error_json(path, &error));
            std::process::exit(1);
        }
        Err(error) => fail(path, &error),
    }
}
