//! Serein.Script CLI
//!
//! Runs, checks and transpiles script files.

mod commands;

use commands::{
    check_files, emit_file, lex_file, parse_file, run_file, EmitOptions, RunOptions,
};

fn main() {
    serein::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let mut options = RunOptions::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                match arg.as_str() {
                    "--no-strict-null" => options.strict_null = false,
                    "--json" => options.json = true,
                    _ if !arg.starts_with('-') && file_path.is_none() => {
                        file_path = Some(arg.as_str());
                    }
                    _ => {
                        eprintln!("error: unknown option '{arg}'");
                        std::process::exit(1);
                    }
                }
            }

            let Some(path) = file_path else {
                eprintln!("Usage: serein run <file> [--no-strict-null] [--json]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --no-strict-null    Treat member access on null as null");
                eprintln!("  --json              Print the result as JSON");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "check" => {
            let json = args.iter().skip(2).any(|arg| arg == "--json");
            let paths: Vec<String> = args
                .iter()
                .skip(2)
                .filter(|arg| !arg.starts_with('-'))
                .cloned()
                .collect();
            if paths.is_empty() {
                eprintln!("Usage: serein check <file>... [--json]");
                std::process::exit(1);
            }
            check_files(&paths, json);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: serein parse <file>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: serein lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "emit" => {
            let mut options = EmitOptions::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if let Some(name) = arg.strip_prefix("--method=") {
                    name.clone_into(&mut options.method_name);
                } else if let Some(name) = arg.strip_prefix("--class=") {
                    options.codegen = options.codegen.with_class_name(name);
                } else if let Some(name) = arg.strip_prefix("--host=") {
                    options.codegen = options.codegen.with_function_host(name);
                } else if arg == "--json" {
                    options.json = true;
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                } else {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(1);
                }
            }

            let Some(path) = file_path else {
                eprintln!("Usage: serein emit <file> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --method=<name>     Method name (default: Run)");
                eprintln!("  --class=<name>      Containing class (default: Script)");
                eprintln!("  --host=<name>       Class hosting global functions");
                eprintln!("  --json              Print the compiled method as JSON");
                std::process::exit(1);
            };
            emit_file(path, &options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Serein.Script {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Serein.Script");
    println!();
    println!("Usage: serein <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>           Compile and run a script");
    println!("  check <file>...      Parse and type check scripts (no execution)");
    println!("  emit <file>          Transpile a script to a C# method");
    println!("  parse <file>         Parse and display statement info");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --no-strict-null     Treat member access on null as null");
    println!("  --json               Print the result as JSON");
    println!();
    println!("Emit options:");
    println!("  --method=<name>      Method name (default: Run)");
    println!("  --class=<name>       Containing class (default: Script)");
    println!("  --host=<name>        Class hosting global functions");
    println!("  --json               Print the compiled method as JSON");
    println!();
    println!("Environment:");
    println!("  SEREIN_LOG           Tracing filter, e.g. serein_eval=debug");
    println!("  SEREIN_LOG_TREE      Render traces as an indented tree");
}
