//! Serein.Script
//!
//! The embedding surface of the toolchain. A [`ScriptEngine`] owns host
//! registrations and compiles source into [`Script`]s; a script runs on
//! the async interpreter or is transpiled to a C# method.
//!
//! ```text
//! source ──lex/parse──▶ Program ──analyze──▶ TypeTable
//!                                               │
//!                        ┌──────────────────────┴─────────────┐
//!                        ▼                                    ▼
//!                  Interpreter::execute               serein_codegen::compile
//!                        │                                    │
//!                      Value                            CompiledMethod
//! ```
//!
//! ```text
//! let engine = ScriptEngine::new();
//! let script = engine.compile("x = a * 2; return x;", &[("a", ScriptType::Int)])?;
//! let value = script.run([("a", Value::Int(21))]).await?;
//! ```

pub mod builtins;
mod config;
mod engine;
mod error;
mod output;
mod script;

pub use config::{EngineConfig, DEFAULT_LOOKAHEAD_LIMIT};
pub use engine::{ScriptEngine, ScriptEngineBuilder};
pub use error::ScriptError;
pub use output::{Output, SharedOutput};
pub use script::Script;

pub use serein_codegen::{CodegenOptions, CompiledMethod, ParamInfo};
pub use serein_diagnostic::{Diagnostic, ErrorCode};
pub use serein_eval::{CancellationToken, DelegateCache, InvocationContext};
pub use serein_ir::{Program, ScriptType};
pub use serein_runtime::{
    ConstructorDescriptor, EvalError, ExternalType, HostObject, IndexerDescriptor,
    MethodDescriptor, MountedFunction, PropertyDescriptor, Value,
};
pub use serein_types::TypeTable;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `SEREIN_LOG` or `RUST_LOG` is set.
///
/// `SEREIN_LOG` takes precedence and uses the same filter syntax as
/// `RUST_LOG`. With `SEREIN_LOG_TREE` also set, spans print as an indented
/// tree. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match std::env::var("SEREIN_LOG") {
            Ok(directives) => EnvFilter::new(directives),
            Err(_) if std::env::var_os("RUST_LOG").is_some() => EnvFilter::from_default_env(),
            Err(_) => return,
        };
        let tree = std::env::var_os("SEREIN_LOG_TREE").is_some();
        tracing_subscriber::registry()
            .with(filter)
            .with(tree.then(|| tracing_tree::HierarchicalLayer::new(2).with_targets(true)))
            .with((!tree).then(|| {
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
            }))
            .init();
    });
}
