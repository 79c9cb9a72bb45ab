//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{Pep723Error, Result};

use super::theme::{render_error_block, Pep723Theme};
use super::{parse_answer, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Prefix of the env vars that answer prompts without a terminal.
pub const PROMPT_ENV_PREFIX: &str = "PEP723_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `PEP723_PROMPT_<KEY>` env vars, then from the
/// prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        match self.env_overrides.get(&env_key) {
            Some(value) => parse_answer(value).ok_or_else(|| {
                Pep723Error::Other(anyhow::anyhow!(
                    "{} must be yes or no, got '{}'",
                    env_key,
                    value
                ))
            }),
            None => Ok(prompt.default),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            quiet: !self.mode.shows_status(),
        })
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", hint);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        eprintln!();
        for line in render_error_block(&Pep723Theme::plain(), command, output) {
            eprintln!("{}", line);
        }
    }
}

/// Spinner that only prints its final line.
struct NoopSpinner {
    quiet: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        if !self.quiet {
            println!("{}", Pep723Theme::plain().format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", Pep723Theme::plain().format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if !self.quiet {
            println!("{}", Pep723Theme::plain().format_skipped(msg));
        }
    }
}
