//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::shell::{OutputCallback, OutputLine};

use super::theme::Pep723Theme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.magenta} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = Pep723Theme::detect().format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = Pep723Theme::detect().format_error(msg);
        self.finish_with(line);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let line = Pep723Theme::detect().format_skipped(msg);
        self.finish_with(line);
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if self.bar.is_hidden() {
            None
        } else {
            Some(self.bar.clone())
        }
    }
}

/// Create an output callback that shows the last `max_lines` output lines
/// under the spinner's base message.
pub fn live_output_callback(
    bar: ProgressBar,
    base_message: String,
    max_lines: usize,
) -> OutputCallback {
    let buffer: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
    let theme = Pep723Theme::detect();

    Box::new(move |line: OutputLine| {
        let text = match &line {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s.trim_end().to_string(),
        };

        if text.is_empty() {
            return;
        }

        let display_text = if text.chars().count() > 72 {
            format!("{}...", text.chars().take(69).collect::<String>())
        } else {
            text
        };

        let Ok(mut buf) = buffer.lock() else {
            return;
        };
        buf.push_back(display_text);
        while buf.len() > max_lines {
            buf.pop_front();
        }

        let mut msg = base_message.clone();
        for line in buf.iter() {
            msg.push_str("\n  ");
            msg.push_str(&theme.dim.apply_to(format!("» {}", line)).to_string());
        }

        bar.set_message(msg);
    })
}
