//! Recording UI for tests.
//!
//! `MockUI` appends every interaction to one ordered log, spinners
//! included, so tests can assert both on what was shown and on the order it
//! was shown in.
//!
//! # Example
//!
//! ```
//! use pep723::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install", "no");
//!
//! ui.message("Resolving interpreter");
//! let answer = ui.confirm(&Prompt::new("install", "Install?", true)).unwrap();
//!
//! assert!(!answer);
//! assert!(ui.has_message("Resolving"));
//! assert_eq!(ui.prompts_shown(), &["install"]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{parse_answer, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Message(String),
    Warning(String),
    Error(String),
    Hint(String),
    ErrorBlock { command: String, output: String },
    Prompt(String),
    SpinnerStarted(String),
    SpinnerFinished(SpinnerStatus, String),
}

/// How a spinner was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
    Skipped,
}

type EventLog = Rc<RefCell<Vec<UiEvent>>>;

#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    log: EventLog,
    prompt_responses: HashMap<String, String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Answer the prompt with `key` using `response` (`yes`, `no`, ...).
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Every recorded interaction, oldest first.
    pub fn events(&self) -> Vec<UiEvent> {
        self.log.borrow().clone()
    }

    fn collect<T>(&self, pick: impl Fn(&UiEvent) -> Option<T>) -> Vec<T> {
        self.log.borrow().iter().filter_map(pick).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Message(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// Messages of every spinner that was started.
    pub fn spinners(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::SpinnerStarted(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// How each spinner finished, in finishing order.
    pub fn spinner_results(&self) -> Vec<(SpinnerStatus, String)> {
        self.collect(|e| match e {
            UiEvent::SpinnerFinished(status, m) => Some((*status, m.clone())),
            _ => None,
        })
    }

    /// Captured error blocks as (command, output).
    pub fn error_blocks(&self) -> Vec<(String, String)> {
        self.collect(|e| match e {
            UiEvent::ErrorBlock { command, output } => Some((command.clone(), output.clone())),
            _ => None,
        })
    }

    /// Keys of every prompt that was shown.
    pub fn prompts_shown(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Prompt(key) => Some(key.clone()),
            _ => None,
        })
    }

    fn contains(&self, needle: &str, kind: fn(&UiEvent) -> Option<&String>) -> bool {
        self.log
            .borrow()
            .iter()
            .filter_map(kind)
            .any(|text| text.contains(needle))
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.contains(msg, |e| match e {
            UiEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.contains(msg, |e| match e {
            UiEvent::Warning(m) => Some(m),
            _ => None,
        })
    }

    /// Matches plain errors and the command of error blocks.
    pub fn has_error(&self, msg: &str) -> bool {
        self.contains(msg, |e| match e {
            UiEvent::Error(m) | UiEvent::ErrorBlock { command: m, .. } => Some(m),
            _ => None,
        })
    }

    pub fn has_hint(&self, msg: &str) -> bool {
        self.contains(msg, |e| match e {
            UiEvent::Hint(m) => Some(m),
            _ => None,
        })
    }

    fn record(&self, event: UiEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.record(UiEvent::Message(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.record(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.record(UiEvent::Error(msg.to_string()));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.record(UiEvent::Prompt(prompt.key.clone()));
        Ok(self
            .prompt_responses
            .get(&prompt.key)
            .and_then(|response| parse_answer(response))
            .unwrap_or(prompt.default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(UiEvent::SpinnerStarted(message.to_string()));
        Box::new(MockSpinner {
            log: Rc::clone(&self.log),
        })
    }

    fn show_hint(&mut self, hint: &str) {
        self.record(UiEvent::Hint(hint.to_string()));
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        self.record(UiEvent::ErrorBlock {
            command: command.to_string(),
            output: output.to_string(),
        });
    }
}

/// Spinner that writes its outcome into the owning [`MockUI`]'s log.
#[derive(Debug)]
pub struct MockSpinner {
    log: EventLog,
}

impl MockSpinner {
    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.log
            .borrow_mut()
            .push(UiEvent::SpinnerFinished(status, msg.to_string()));
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Skipped, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_keep_their_order() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.start_spinner("Resolving...").finish_error("no python");
        ui.show_hint("Set requires-python");

        assert_eq!(
            ui.events(),
            vec![
                UiEvent::Message("Hello".into()),
                UiEvent::SpinnerStarted("Resolving...".into()),
                UiEvent::SpinnerFinished(SpinnerStatus::Error, "no python".into()),
                UiEvent::Hint("Set requires-python".into()),
            ]
        );
    }

    #[test]
    fn confirm_uses_configured_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("install", "yes");

        assert!(ui.confirm(&Prompt::new("install", "Install?", false)).unwrap());
        assert!(!ui.confirm(&Prompt::new("other", "Other?", false)).unwrap());
        assert_eq!(ui.prompts_shown(), &["install", "other"]);
    }

    #[test]
    fn unparsable_response_falls_back_to_default() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("install", "maybe");
        assert!(ui.confirm(&Prompt::new("install", "Install?", true)).unwrap());
    }

    #[test]
    fn error_blocks_count_as_errors() {
        let mut ui = MockUI::new();
        ui.show_error_block("python3 -m pip install \"rich\"", "No matching distribution");

        assert_eq!(ui.error_blocks().len(), 1);
        assert!(ui.has_error("pip install"));
        assert!(!ui.has_message("pip install"));
    }

    #[test]
    fn output_mode_can_change() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);

        ui.set_output_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
