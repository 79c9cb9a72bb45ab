//! Where install command lines are sent.

use std::cell::RefCell;

use crate::error::Result;
use crate::shell::{execute, execute_streaming, CommandOptions, OutputCallback, OutputLine};
use crate::ui::{live_output_callback, OutputMode, UserInterface};

/// Receives a rendered command line and runs it.
pub trait Terminal {
    /// Run `command_line`; returns whether it exited successfully.
    fn send(&self, command_line: &str, ui: &mut dyn UserInterface) -> Result<bool>;
}

/// Runs command lines through the user's login shell.
#[derive(Debug, Clone, Default)]
pub struct ShellTerminal {
    options: CommandOptions,
}

impl ShellTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands from `options.cwd`.
    pub fn with_options(options: CommandOptions) -> Self {
        Self { options }
    }
}

impl Terminal for ShellTerminal {
    fn send(&self, command_line: &str, ui: &mut dyn UserInterface) -> Result<bool> {
        let label = format!("Running `{}`...", command_line);
        let mut spinner = ui.start_spinner(&label);
        let output_mode = ui.output_mode();

        // Live tail under the spinner when one is drawn, plain streaming in
        // verbose mode otherwise, captured output in every other case.
        let callback: Option<OutputCallback> = spinner
            .progress_bar()
            .and_then(|bar| {
                let max_lines = match output_mode {
                    OutputMode::Verbose => 3,
                    OutputMode::Normal => 2,
                    _ => return None,
                };
                Some(live_output_callback(bar, label.clone(), max_lines))
            })
            .or_else(|| {
                if output_mode.shows_command_output() {
                    let cb: OutputCallback = Box::new(|line: OutputLine| {
                        let text = match &line {
                            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s.trim_end(),
                        };
                        if !text.is_empty() {
                            println!("    {text}");
                        }
                    });
                    Some(cb)
                } else {
                    None
                }
            });

        let result = match callback {
            Some(cb) => execute_streaming(command_line, &self.options, cb),
            None => execute(command_line, &self.options),
        };

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                spinner.finish_error("Could not start the install command");
                return Err(e);
            }
        };

        tracing::debug!(
            "Install command exited with {:?} after {:?}",
            result.exit_code,
            result.duration
        );

        if result.success() {
            spinner.finish_success("Dependencies installed");
        } else {
            spinner.finish_error(&match result.exit_code {
                Some(code) => format!("Install command failed (exit code {})", code),
                None => "Install command was terminated".to_string(),
            });
            ui.show_error_block(command_line, tail(&result.stderr, 20).trim_end());
        }

        Ok(result.success())
    }
}

fn tail(text: &str, lines: usize) -> &str {
    let mut count = 0;
    for (idx, c) in text.char_indices().rev() {
        if c == '\n' && idx + 1 < text.len() {
            count += 1;
            if count == lines {
                return &text[idx + 1..];
            }
        }
    }
    text
}

/// Terminal double that records command lines instead of running them.
#[derive(Debug)]
pub struct RecordingTerminal {
    sent: RefCell<Vec<String>>,
    succeed: bool,
}

impl Default for RecordingTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTerminal {
    /// A terminal whose commands all succeed.
    pub fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            succeed: true,
        }
    }

    /// A terminal whose commands all fail.
    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::new()
        }
    }

    /// Every command line sent so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Terminal for RecordingTerminal {
    fn send(&self, command_line: &str, _ui: &mut dyn UserInterface) -> Result<bool> {
        self.sent.borrow_mut().push(command_line.to_string());
        Ok(self.succeed)
    }
}
