//! Running command lines through the user's shell.

pub mod command;
pub mod platform;

pub use command::{
    execute, execute_streaming, CommandOptions, OutputCallback, OutputLine, ShellOutput,
};
pub use platform::{is_ci, is_ci_with, CI_ENV_VARS};
