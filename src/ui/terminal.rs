//! Interactive terminal UI.

use console::Term;

use crate::error::Result;

use super::theme::render_error_block;
use super::{
    prompt_confirm, NonInteractiveUI, OutputMode, Pep723Theme, ProgressSpinner, Prompt,
    SpinnerHandle, UserInterface,
};

/// UI for a user sitting at a terminal: colored output, live spinners and
/// real prompts.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Pep723Theme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: Pep723Theme::detect(),
            mode,
        }
    }

    /// Print to stdout unless the mode hides status output.
    fn status(&self, line: &str) {
        if self.mode.shows_status() {
            self.out.write_line(line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.status(msg);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.err.write_line(&self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        self.err.write_line(&self.theme.format_error(msg)).ok();
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        prompt_confirm(prompt, &self.out)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(if self.mode.shows_spinners() {
            ProgressSpinner::new(message)
        } else {
            ProgressSpinner::hidden()
        })
    }

    fn show_hint(&mut self, hint: &str) {
        self.status(&format!("  {}", self.theme.hint.apply_to(hint)));
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        for line in render_error_block(&self.theme, command, output) {
            self.err.write_line(&line).ok();
        }
    }
}

/// Pick [`TerminalUI`] when `interactive` and stdout is a terminal,
/// [`NonInteractiveUI`] otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let mut ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        ui.set_output_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn silent_terminal_ui_hides_spinners() {
        let mut ui = TerminalUI::new(OutputMode::Silent);
        let spinner = ui.start_spinner("Installing...");
        assert!(spinner.progress_bar().is_none());
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Silent);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
