//! Debug commands: `parse` and `lex` for inspecting the front end.

use serein::ScriptEngine;

use super::{fail, read_file};

/// Parse a file and display its statements.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let engine = ScriptEngine::new();
    let program = match engine.parse(&source) {
        Ok(program) => program,
        Err(error) => fail(path, &error),
    };

    println!("Parse result for '{path}':");
    println!("  Statements: {}", program.statements().len());
    println!("  Nodes: {}", program.arena().len());

    if !program.statements().is_empty() {
        println!();
        println!("Statements:");
        for &stmt in program.statements() {
            let location = program.locate_node(stmt);
            println!(
                "  {:>4}  {:<20} {}",
                location.row,
                program.arena().kind(stmt).label(),
                location.line_text.trim()
            );
        }
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let engine = ScriptEngine::new();
    let (tokens, _interner) = match engine.tokenize(&source) {
        Ok(lexed) => lexed,
        Err(error) => fail(path, &error),
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!(
            "  {:>4}  {:<18} {}",
            token.row,
            token.kind.display_name(),
            token.span.text(&source)
        );
    }
}
