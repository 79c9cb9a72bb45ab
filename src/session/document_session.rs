//! Per-document metadata cache and the install trigger.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::install::{decide_install, InstallDecision};
use crate::interpreter::InterpreterResolver;
use crate::metadata::{read_metadata, Metadata};
use crate::ui::UserInterface;
use crate::version::satisfies;

use super::document::{Document, StatusItem};
use super::terminal::Terminal;

/// What an install trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// No document with metadata has been seen.
    NoMetadata,
    /// A decision was made that runs nothing.
    Skipped(InstallDecision),
    /// A command line was handed to the terminal.
    Sent { command_line: String, success: bool },
}

/// Tracks the metadata of the most recently updated document.
///
/// Only one slot is kept. Updating with another document replaces it.
#[derive(Debug, Default)]
pub struct DocumentSession {
    current: Option<(PathBuf, Metadata)>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute metadata for `document` and return the indicator state.
    pub fn update(&mut self, document: &Document) -> Result<StatusItem> {
        if !document.is_python() {
            tracing::debug!("{} is not a Python script", document.id.display());
            self.clear();
            return Ok(StatusItem::hidden());
        }

        match read_metadata(&document.text) {
            Ok(Some(metadata)) => {
                self.current = Some((document.id.clone(), metadata));
                Ok(StatusItem::shown())
            }
            Ok(None) => {
                self.clear();
                Ok(StatusItem::hidden())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Forget the stored document.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Metadata of the stored document.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.current.as_ref().map(|(_, metadata)| metadata)
    }

    /// Identity of the stored document.
    pub fn document(&self) -> Option<&Path> {
        self.current.as_ref().map(|(id, _)| id.as_path())
    }

    /// Resolve the interpreter and decide what an install would do.
    ///
    /// Returns `None` when no metadata is stored.
    pub fn decide(
        &self,
        resolver: &InterpreterResolver,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<InstallDecision>> {
        let Some(metadata) = self.metadata() else {
            return Ok(None);
        };

        let mut spinner = ui.start_spinner("Resolving Python interpreter...");
        let interpreter = match resolver.resolve() {
            Ok(info) => info,
            Err(e) => {
                spinner.finish_error("Could not determine the Python version");
                return Err(e);
            }
        };

        let decision = decide_install(metadata, &interpreter, satisfies);
        let summary = format!(
            "Using {} (Python {})",
            interpreter.executable, interpreter.version
        );
        match &decision {
            InstallDecision::Install(_) => spinner.finish_success(&summary),
            InstallDecision::UnmetConstraint { .. } => spinner.finish_error(&summary),
            InstallDecision::NoVersionConstraint | InstallDecision::NothingToInstall => {
                spinner.finish_skipped(&summary)
            }
        }

        Ok(Some(decision))
    }

    /// Act on a decision: report it, or send its command to `terminal`.
    pub fn execute(
        &self,
        decision: InstallDecision,
        terminal: &dyn Terminal,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome> {
        match decision {
            InstallDecision::Install(plan) => {
                let command_line = plan.command_line();
                let success = terminal.send(&command_line, ui)?;
                Ok(InstallOutcome::Sent {
                    command_line,
                    success,
                })
            }
            skipped => {
                report_skipped(&skipped, ui);
                Ok(InstallOutcome::Skipped(skipped))
            }
        }
    }

    /// Run the whole install trigger for the stored document.
    pub fn install(
        &self,
        resolver: &InterpreterResolver,
        terminal: &dyn Terminal,
        ui: &mut dyn UserInterface,
    ) -> Result<InstallOutcome> {
        match self.decide(resolver, ui)? {
            Some(decision) => self.execute(decision, terminal, ui),
            None => Ok(InstallOutcome::NoMetadata),
        }
    }
}

fn report_skipped(decision: &InstallDecision, ui: &mut dyn UserInterface) {
    match decision {
        InstallDecision::UnmetConstraint { required, found } => {
            if let Some(message) = decision.user_message() {
                ui.error(&message);
            }
            ui.show_hint(&format!(
                "Found Python {}; select an interpreter matching {}",
                found, required
            ));
        }
        InstallDecision::NoVersionConstraint => {
            ui.show_hint("Add `requires-python` to the script block to enable installs");
        }
        InstallDecision::NothingToInstall => ui.message("No dependencies to install"),
        InstallDecision::Install(_) => {}
    }
}
