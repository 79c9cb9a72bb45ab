//! Sources for the "active" interpreter.
//!
//! An editor asks its Python extension for the active environment; here the
//! same question is answered by an explicit override and by the environment
//! variables that virtualenv and conda export on activation.

use std::path::{Path, PathBuf};

/// Something that may know which interpreter is currently active.
pub trait ActiveEnvironment {
    /// Executable path of the active interpreter, if known.
    fn active_interpreter(&self) -> Option<String>;
}

/// An interpreter named directly (CLI flag, env var, or settings file).
#[derive(Debug, Clone, Default)]
pub struct ExplicitInterpreter(Option<String>);

impl ExplicitInterpreter {
    pub fn new(executable: Option<String>) -> Self {
        Self(executable.filter(|e| !e.trim().is_empty()))
    }
}

impl ActiveEnvironment for ExplicitInterpreter {
    fn active_interpreter(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Layout of an environment prefix on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    /// `python -m venv` / virtualenv (`VIRTUAL_ENV`).
    VirtualEnv,
    /// conda / mamba (`CONDA_PREFIX`).
    Conda,
}

impl PrefixKind {
    /// Environment variable that points at an activated prefix.
    pub fn env_var(&self) -> &'static str {
        match self {
            PrefixKind::VirtualEnv => "VIRTUAL_ENV",
            PrefixKind::Conda => "CONDA_PREFIX",
        }
    }

    /// Interpreter location relative to the prefix.
    pub fn interpreter_subpath(&self) -> &'static str {
        match (self, cfg!(windows)) {
            (PrefixKind::VirtualEnv, true) => "Scripts/python.exe",
            (PrefixKind::Conda, true) => "python.exe",
            (_, false) => "bin/python",
        }
    }
}

/// An activated environment prefix read from its environment variable.
#[derive(Debug, Clone)]
pub struct PrefixEnvironment {
    kind: PrefixKind,
    prefix: Option<PathBuf>,
}

impl PrefixEnvironment {
    /// Read the prefix from the process environment.
    pub fn from_env(kind: PrefixKind) -> Self {
        Self::from_env_with(kind, |key: &str| std::env::var(key))
    }

    /// Read the prefix with a custom env var lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn from_env_with<F>(kind: PrefixKind, env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let prefix = env_fn(kind.env_var())
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self { kind, prefix }
    }

    /// The prefix directory, if the variable was set.
    pub fn prefix(&self) -> Option<&Path> {
        self.prefix.as_deref()
    }
}

impl ActiveEnvironment for PrefixEnvironment {
    fn active_interpreter(&self) -> Option<String> {
        let candidate = self.prefix.as_ref()?.join(self.kind.interpreter_subpath());
        if candidate.is_file() {
            Some(candidate.to_string_lossy().to_string())
        } else {
            tracing::debug!(
                "{} is set but {} does not exist",
                self.kind.env_var(),
                candidate.display()
            );
            None
        }
    }
}

/// Ordered list of sources; the first one that answers wins.
#[derive(Default)]
pub struct EnvironmentChain {
    sources: Vec<Box<dyn ActiveEnvironment>>,
}

impl EnvironmentChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the chain.
    pub fn with(mut self, source: impl ActiveEnvironment + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Standard chain: explicit override, then virtualenv, then conda.
    pub fn detect(explicit: Option<String>) -> Self {
        Self::detect_with_env(explicit, |key: &str| std::env::var(key))
    }

    /// Standard chain with a custom env var lookup function.
    pub fn detect_with_env<F>(explicit: Option<String>, env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        Self::new()
            .with(ExplicitInterpreter::new(explicit))
            .with(PrefixEnvironment::from_env_with(
                PrefixKind::VirtualEnv,
                &env_fn,
            ))
            .with(PrefixEnvironment::from_env_with(PrefixKind::Conda, &env_fn))
    }

    /// Number of sources in the chain.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the chain has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ActiveEnvironment for EnvironmentChain {
    fn active_interpreter(&self) -> Option<String> {
        self.sources
            .iter()
            .find_map(|source| source.active_interpreter())
    }
}
