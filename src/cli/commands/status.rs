//! Status command implementation.
//!
//! The `pep723 status` command reports whether a script carries an inline
//! metadata block, the way the install indicator would.

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::error::{Pep723Error, Result};
use crate::metadata::Metadata;
use crate::session::{Document, DocumentSession, StatusItem};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    args: StatusArgs,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    #[serde(flatten)]
    status: StatusItem,
    metadata: Option<&'a Metadata>,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(args: StatusArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let document = Document::load(&self.args.script)?;
        let mut session = DocumentSession::new();
        let status = session.update(&document)?;

        if self.args.json {
            let report = StatusReport {
                status,
                metadata: session.metadata(),
            };
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| Pep723Error::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if !document.is_python() {
            ui.message(&format!("{} is not a Python script", self.args.script.display()));
            return Ok(CommandResult::success());
        }
        if !status.visible {
            ui.message("No inline script metadata");
            return Ok(CommandResult::success());
        }

        ui.message(status.label);
        if let Some(metadata) = session.metadata() {
            match &metadata.requires_python {
                Some(constraint) => ui.show_hint(&format!("requires-python: {}", constraint)),
                None => ui.show_hint("requires-python: (not set)"),
            }
            for dependency in metadata.dependencies() {
                ui.show_hint(&format!("- {}", dependency));
            }
        }

        Ok(CommandResult::success())
    }
}
