//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher; `config_override` is the global `--config` path.
    pub fn new(config_override: Option<PathBuf>) -> Self {
        Self { config_override }
    }

    /// Settings file that replaces the discovered ones, if any.
    pub fn config_override(&self) -> Option<&Path> {
        self.config_override.as_deref()
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Install(args)) => {
                let cmd =
                    super::install::InstallCommand::new(args.clone(), self.config_override.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Unreachable through clap (arg_required_else_help)
                ui.error("No command given. Run `pep723 --help` for usage.");
                Ok(CommandResult::failure(2))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_keeps_config_override() {
        let dispatcher = CommandDispatcher::new(Some(PathBuf::from("/test/pep723.yml")));
        assert_eq!(
            dispatcher.config_override(),
            Some(Path::new("/test/pep723.yml"))
        );
        assert!(CommandDispatcher::default().config_override().is_none());
    }

    #[test]
    fn dispatches_status() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("tool.py");
        fs::write(&script, "# /// script\n# dependencies = []\n# ///\n").unwrap();

        let cli = Cli::parse_from(["pep723", "status", script.to_str().unwrap()]);
        let mut ui = MockUI::new();
        let result = CommandDispatcher::default().dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Install [PEP723]"));
    }

    #[test]
    fn dispatch_without_command_fails() {
        let cli = Cli {
            config: None,
            verbose: false,
            quiet: false,
            no_color: false,
            debug: false,
            command: None,
        };
        let mut ui = MockUI::new();
        let result = CommandDispatcher::default().dispatch(&cli, &mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("pep723 --help"));
    }
}
