//! Error types for pep723 operations.
//!
//! This module defines [`Pep723Error`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Extraction and parse failures propagate to the caller that triggered them
//! - An unmet `requires-python` constraint is a decision outcome, not an error
//! - Use `anyhow::Error` (via `Pep723Error::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pep723 operations.
#[derive(Debug, Error)]
pub enum Pep723Error {
    /// More than one metadata block of the same type in a single document.
    #[error("Multiple {block_type} blocks found ({count})")]
    MultipleBlocks { block_type: String, count: usize },

    /// Block content is not valid TOML or a known key has the wrong type.
    #[error("Invalid script metadata: {message}")]
    MetadataFormat { message: String },

    /// The interpreter could not be run or did not report a version.
    #[error("Failed to query interpreter '{executable}': {message}")]
    InterpreterInvocation { executable: String, message: String },

    /// Shell command failed to start or exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Settings file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pep723 operations.
pub type Result<T> = std::result::Result<T, Pep723Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_blocks_displays_type_and_count() {
        let err = Pep723Error::MultipleBlocks {
            block_type: "script".into(),
            count: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Multiple script blocks"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn metadata_format_displays_message() {
        let err = Pep723Error::MetadataFormat {
            message: "expected `=`".into(),
        };
        assert!(err.to_string().contains("expected `=`"));
    }

    #[test]
    fn interpreter_invocation_displays_executable_and_message() {
        let err = Pep723Error::InterpreterInvocation {
            executable: "/opt/py/bin/python".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/opt/py/bin/python"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = Pep723Error::CommandFailed {
            command: "python3 -m pip install \"rich\"".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("pip install"));
        assert!(msg.contains('1'));
    }

    #[test]
    fn config_errors_display_path() {
        let err = Pep723Error::ConfigNotFound {
            path: PathBuf::from("/tmp/pep723.yml"),
        };
        assert!(err.to_string().contains("/tmp/pep723.yml"));

        let err = Pep723Error::ConfigParseError {
            path: PathBuf::from("/tmp/.pep723.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/.pep723.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Pep723Error = io_err.into();
        assert!(matches!(err, Pep723Error::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(Pep723Error::MetadataFormat {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
