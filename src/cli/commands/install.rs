//! Install command implementation.
//!
//! The `pep723 install` command resolves the active interpreter, checks it
//! against the script's `requires-python` and runs `pip install` for the
//! declared dependencies.

use std::path::PathBuf;

use crate::cli::args::InstallArgs;
use crate::config::{load_settings, Settings};
use crate::error::Result;
use crate::install::InstallDecision;
use crate::interpreter::{
    EnvironmentChain, ExplicitInterpreter, InterpreterResolver, ProcessVersionQuery, VersionQuery,
};
use crate::session::{Document, DocumentSession, InstallOutcome, ShellTerminal, Terminal};
use crate::shell::CommandOptions;
use crate::ui::{OutputMode, Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Key of the confirmation prompt (`PEP723_PROMPT_INSTALL` when headless).
pub const INSTALL_PROMPT_KEY: &str = "install";

/// The install command implementation.
pub struct InstallCommand {
    args: InstallArgs,
    config_override: Option<PathBuf>,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(args: InstallArgs, config_override: Option<PathBuf>) -> Self {
        Self {
            args,
            config_override,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    fn script_dir(&self) -> PathBuf {
        match self.args.script.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Interpreter sources in priority order.
    ///
    /// `--python`/`PEP723_PYTHON` beats the settings file, which beats the
    /// active virtualenv or conda env. `fallback_python` comes last.
    fn environment(&self, settings: &Settings) -> EnvironmentChain {
        let explicit = self.args.python.clone().or_else(|| settings.python.clone());
        EnvironmentChain::detect(explicit)
            .with(ExplicitInterpreter::new(Some(settings.fallback_python.clone())))
    }

    /// Run the command against an injected version query and terminal.
    pub fn run(
        &self,
        query: impl VersionQuery + 'static,
        terminal: &dyn Terminal,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let script_dir = self.script_dir();
        let settings = load_settings(&script_dir, self.config_override.as_deref())?;
        apply_output_setting(&settings, ui);

        let document = Document::load(&self.args.script)?;
        let mut session = DocumentSession::new();
        if !session.update(&document)?.visible {
            let reason = if document.is_python() {
                format!("No inline script metadata in {}", self.args.script.display())
            } else {
                format!("{} is not a Python script", self.args.script.display())
            };
            ui.warning(&reason);
            return Ok(CommandResult::success());
        }

        let resolver = InterpreterResolver::new(self.environment(&settings), query);
        let Some(decision) = session.decide(&resolver, ui)? else {
            return Ok(CommandResult::success());
        };

        if let InstallDecision::Install(plan) = &decision {
            let command_line = plan.command_line();

            if self.args.dry_run {
                ui.message(&command_line);
                return Ok(CommandResult::success());
            }

            if settings.confirm && !self.args.yes {
                let prompt = Prompt::new(
                    INSTALL_PROMPT_KEY,
                    format!("Run `{}`?", command_line),
                    true,
                );
                if !ui.confirm(&prompt)? {
                    ui.message("Install cancelled");
                    return Ok(CommandResult::success());
                }
            }
        }

        let outcome = session.execute(decision, terminal, ui)?;
        Ok(result_for(&outcome))
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let terminal = ShellTerminal::with_options(CommandOptions {
            cwd: Some(self.script_dir()),
            ..Default::default()
        });
        self.run(ProcessVersionQuery, &terminal, ui)
    }
}

/// The settings file only applies when no flag changed the output mode.
fn apply_output_setting(settings: &Settings, ui: &mut dyn UserInterface) {
    if let Some(mode) = settings.output {
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(mode.into());
        }
    }
}

fn result_for(outcome: &InstallOutcome) -> CommandResult {
    match outcome {
        InstallOutcome::Sent { success: true, .. } => CommandResult::success(),
        InstallOutcome::Sent { success: false, .. } => CommandResult::failure(1),
        InstallOutcome::Skipped(InstallDecision::UnmetConstraint { .. }) => {
            CommandResult::failure(1)
        }
        InstallOutcome::Skipped(_) | InstallOutcome::NoMetadata => CommandResult::success(),
    }
}
