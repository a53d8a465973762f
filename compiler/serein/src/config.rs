//! Engine configuration.

/// Default cap on tokens scanned to classify an identifier-led statement.
pub const DEFAULT_LOOKAHEAD_LIMIT: usize = 1024;

/// Settings shared by every script an engine compiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Member, method and index access on a null receiver fails instead of
    /// evaluating to null.
    pub strict_null: bool,
    /// Look-ahead budget of the parser, in tokens.
    pub lookahead_limit: usize,
    /// Mount `print`, `println`, `delay` and `len` at build time.
    pub install_builtins: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strict_null: true,
            lookahead_limit: DEFAULT_LOOKAHEAD_LIMIT,
            install_builtins: true,
        }
    }
}
