//! Active interpreter discovery.
//!
//! # Modules
//!
//! - [`environment`] - Sources that may name the active interpreter
//! - [`resolver`] - Version lookup and the [`InterpreterInfo`] result
//!
//! # Example
//!
//! ```no_run
//! use pep723::interpreter::{resolve_interpreter, EnvironmentChain, ProcessVersionQuery};
//!
//! let chain = EnvironmentChain::detect(None);
//! let info = resolve_interpreter(&chain, &ProcessVersionQuery).unwrap();
//! println!("{} {}", info.executable, info.version);
//! ```

pub mod environment;
pub mod resolver;

pub use environment::{
    ActiveEnvironment, EnvironmentChain, ExplicitInterpreter, PrefixEnvironment, PrefixKind,
};
pub use resolver::{
    locate_executable, parse_version_output, resolve_interpreter, resolve_interpreter_in,
    system_path, InterpreterInfo, InterpreterResolver, ProcessVersionQuery, VersionQuery,
    DEFAULT_INTERPRETER,
};
