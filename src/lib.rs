//! pep723 - Inline script metadata for Python scripts.
//!
//! Finds the `# /// script` block a script declares (PEP 723), checks the
//! active Python interpreter against its `requires-python` and installs the
//! listed dependencies with `pip`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading and merging
//! - [`error`] - Error types and result aliases
//! - [`install`] - Install decisions and command rendering
//! - [`interpreter`] - Active interpreter discovery and version lookup
//! - [`metadata`] - Block extraction, normalization and parsing
//! - [`session`] - Per-document status and the install trigger
//! - [`shell`] - Shell command execution
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`version`] - PEP 440 version specifiers
//!
//! # Example
//!
//! ```
//! use pep723::install::plan_install;
//! use pep723::interpreter::InterpreterInfo;
//! use pep723::metadata::read_metadata;
//! use pep723::version::satisfies;
//!
//! let script = r#"# /// script
//! ## requires-python = ">=3.8"
//! ## dependencies = ["requests"]
//! ## ///
//! "#;
//!
//! let metadata = read_metadata(script).unwrap().unwrap();
//! let interpreter = InterpreterInfo {
//!     executable: "python3".to_string(),
//!     version: "3.11.4".to_string(),
//! };
//!
//! let plan = plan_install(&metadata, &interpreter, satisfies).unwrap();
//! assert_eq!(plan.command_line(), r#"python3 -m pip install "requests""#);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod interpreter;
pub mod metadata;
pub mod session;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{Pep723Error, Result};
