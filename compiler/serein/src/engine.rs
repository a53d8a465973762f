//! The script engine: registries plus the compile pipeline.

use std::sync::Arc;

use serein_eval::DelegateCache;
use serein_ir::{Program, ScriptType, SharedInterner, Token};
use serein_parse::Parser;
use serein_runtime::{ExternalType, MountedFunction, Registries};
use serein_types::TypeAnalyzer;

use crate::output::{Output, SharedOutput};
use crate::{builtins, EngineConfig, Script, ScriptError};

/// Owns the host registrations every script compiled by it sees.
///
/// Engines are independent: functions and types registered on one are
/// invisible to another.
pub struct ScriptEngine {
    config: EngineConfig,
    registries: Arc<Registries>,
    output: SharedOutput,
}

/// Builder for [`ScriptEngine`].
#[derive(Debug, Default)]
pub struct ScriptEngineBuilder {
    config: EngineConfig,
    output: Option<SharedOutput>,
}

impl ScriptEngineBuilder {
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn strict_null(mut self, strict_null: bool) -> Self {
        self.config.strict_null = strict_null;
        self
    }

    #[must_use]
    pub fn lookahead_limit(mut self, limit: usize) -> Self {
        self.config.lookahead_limit = limit;
        self
    }

    #[must_use]
    pub fn install_builtins(mut self, install: bool) -> Self {
        self.config.install_builtins = install;
        self
    }

    /// Where `print` and `println` write. Defaults to stdout.
    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    pub fn build(self) -> ScriptEngine {
        let output = self.output.unwrap_or_else(Output::stdout);
        let registries = Registries::new();
        if self.config.install_builtins {
            builtins::install(&registries, &output);
        }
        ScriptEngine {
            config: self.config,
            registries: Arc::new(registries),
            output,
        }
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ScriptEngineBuilder {
        ScriptEngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    /// Mount a function under `name`, replacing any earlier one.
    pub fn register_function(
        &self,
        name: &str,
        function: MountedFunction,
    ) -> Option<Arc<MountedFunction>> {
        tracing::debug!(name, "registering function");
        self.registries.functions.register(name, function)
    }

    /// Register a host type under its own name, and under `alias` when
    /// given.
    pub fn register_type(&self, ty: ExternalType, alias: Option<&str>) {
        tracing::debug!(name = ty.name(), alias, "registering type");
        self.registries.types.register_external(ty, alias);
    }

    /// Tokenize `source`. Tokens carry names interned in the returned
    /// interner.
    pub fn tokenize(&self, source: &str) -> Result<(Vec<Token>, SharedInterner), ScriptError> {
        let interner = SharedInterner::new();
        let tokens = serein_lexer::lex(source, &interner)?;
        Ok((tokens, interner))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn parse(&self, source: &str) -> Result<Program, ScriptError> {
        let interner = SharedInterner::new();
        let program = Parser::new(source, &interner)?
            .with_lookahead_limit(self.config.lookahead_limit)
            .parse_program()?;
        Ok(program)
    }

    /// Parse and analyze `source`, returning its result type.
    pub fn check<S: AsRef<str>>(
        &self,
        source: &str,
        params: &[(S, ScriptType)],
    ) -> Result<ScriptType, ScriptError> {
        Ok(self.compile(source, params)?.return_type().clone())
    }

    /// Parse and analyze `source` with the given host parameters.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn compile<S: AsRef<str>>(
        &self,
        source: &str,
        params: &[(S, ScriptType)],
    ) -> Result<Script, ScriptError> {
        let program = self.parse(source)?;
        let params: Vec<(Arc<str>, ScriptType)> = params
            .iter()
            .map(|(name, ty)| (Arc::from(name.as_ref()), ty.clone()))
            .collect();
        let table = TypeAnalyzer::new(&self.registries)
            .with_params(params.iter().map(|(name, ty)| (name.as_ref(), ty.clone())))
            .analyze(&program)?;
        tracing::debug!(return_type = %table.return_type(), "compiled script");
        Ok(Script::new(
            program,
            table,
            params,
            Arc::clone(&self.registries),
            Arc::new(DelegateCache::new()),
            self.config.strict_null,
        ))
    }
}

impl std::fmt::Debug for ScriptEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptEngine")
            .field("config", &self.config)
            .field("functions", &self.registries.functions.len())
            .field("types", &self.registries.types.len())
            .finish_non_exhaustive()
    }
}
