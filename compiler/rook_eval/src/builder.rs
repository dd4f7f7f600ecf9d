//! `EvaluatorBuilder` for creating evaluators with a chosen configuration.

use rook_value::{FunctionValue, NativeFn, ParamSpec, Value};

use crate::config::EvalConfig;
use crate::evaluator::Evaluator;
use crate::prelude;
use crate::registry::{RegistryError, SharedTypeRegistry};

/// Builder for [`Evaluator`] instances.
///
/// By default the core prelude is installed and its registry is built
/// fresh. A host that shares one registry across evaluators passes it with
/// [`registry`](Self::registry).
pub struct EvaluatorBuilder {
    config: EvalConfig,
    registry: Option<SharedTypeRegistry>,
    prelude: bool,
    globals: Vec<(String, Value)>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        EvaluatorBuilder {
            config: EvalConfig::default(),
            registry: None,
            prelude: true,
            globals: Vec::new(),
        }
    }

    /// Set the resource limits.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already-built registry instead of building one.
    #[must_use]
    pub fn registry(mut self, registry: SharedTypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Whether to install the core prelude (default `true`).
    #[must_use]
    pub fn prelude(mut self, install: bool) -> Self {
        self.prelude = install;
        self
    }

    /// Bind a host value in the root frame (e.g. process arguments).
    #[must_use]
    pub fn global(mut self, name: &str, value: Value) -> Self {
        self.globals.push((name.to_string(), value));
        self
    }

    /// Bind a host native in the root frame.
    #[must_use]
    pub fn native(self, name: &str, spec: ParamSpec, native: NativeFn) -> Self {
        self.global(name, Value::Function(FunctionValue::native(spec, native)))
    }

    /// Build the evaluator. Host globals are bound after the prelude, so
    /// they may replace prelude words.
    pub fn build(self) -> Result<Evaluator, RegistryError> {
        let registry = match self.registry {
            Some(registry) => registry,
            None if self.prelude => prelude::core_registry()?,
            None => SharedTypeRegistry::default(),
        };
        let mut evaluator = Evaluator::with_parts(self.config, registry);
        if self.prelude {
            prelude::install(&mut evaluator);
        }
        for (name, value) in self.globals {
            evaluator.bind_global(&name, value);
        }
        Ok(evaluator)
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// An evaluator with the default configuration and the core prelude.
    pub fn new() -> Result<Self, RegistryError> {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }
}
