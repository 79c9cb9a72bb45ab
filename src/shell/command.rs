//! Running a command line through the user's shell.
//!
//! Install commands go through a login shell so they see the same `PATH`
//! the user's terminal would. Output is either collected whole
//! ([`execute`]) or handed over line by line while the child runs
//! ([`execute_streaming`]).

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Pep723Error, Result};

/// What a finished command left behind.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Where a command runs.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory; the current one when unset.
    pub cwd: Option<PathBuf>,
}

/// One line of child output, tagged with its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Receives output lines as they arrive.
pub type OutputCallback = Box<dyn Fn(OutputLine) + Send>;

/// Program and flag that make the user's shell run one command string.
///
/// Unix uses `-lic` so rc files that activate pyenv, conda or mise run
/// first. Under CI there is no TTY for `-i`, so `-lc` is used instead.
fn shell_invocation(ci: bool) -> (String, &'static str) {
    if cfg!(target_os = "windows") {
        let shell = std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string());
        (shell, "/C")
    } else {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
        (shell, if ci { "-lc" } else { "-lic" })
    }
}

fn shell_command(command_line: &str, options: &CommandOptions) -> Command {
    let (shell, flag) = shell_invocation(super::is_ci());
    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(command_line);
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    cmd
}

fn spawn_failed(command_line: &str, error: std::io::Error) -> Pep723Error {
    tracing::debug!("Could not start `{}`: {}", command_line, error);
    Pep723Error::CommandFailed {
        command: command_line.to_string(),
        code: None,
    }
}

/// Run `command_line` and collect both output streams.
pub fn execute(command_line: &str, options: &CommandOptions) -> Result<ShellOutput> {
    let start = Instant::now();
    let output = shell_command(command_line, options)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_failed(command_line, e))?;

    Ok(ShellOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration: start.elapsed(),
    })
}

/// Forward every line of `stream` to `tx`, returning the whole text.
fn pump<R: Read + Send + 'static>(
    stream: R,
    tx: Sender<OutputLine>,
    tag: fn(String) -> OutputLine,
) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut collected = String::new();
        for line in BufReader::new(stream).lines().map_while(std::result::Result::ok) {
            collected.push_str(&line);
            collected.push('\n');
            let _ = tx.send(tag(line));
        }
        collected
    })
}

/// Run `command_line`, calling `callback` on this thread for each output line.
///
/// The returned [`ShellOutput`] still holds the full text of both streams.
pub fn execute_streaming(
    command_line: &str,
    options: &CommandOptions,
    callback: OutputCallback,
) -> Result<ShellOutput> {
    let start = Instant::now();
    let mut child = shell_command(command_line, options)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_failed(command_line, e))?;

    let (tx, rx) = mpsc::channel();
    let readers = match (child.stdout.take(), child.stderr.take()) {
        (Some(out), Some(err)) => (
            pump(out, tx.clone(), OutputLine::Stdout),
            pump(err, tx, OutputLine::Stderr),
        ),
        _ => {
            let _ = child.kill();
            return Err(Pep723Error::CommandFailed {
                command: command_line.to_string(),
                code: None,
            });
        }
    };

    for line in rx {
        callback(line);
    }

    let stdout = readers.0.join().unwrap_or_default();
    let stderr = readers.1.join().unwrap_or_default();
    let status = child.wait().map_err(|e| spawn_failed(command_line, e))?;

    Ok(ShellOutput {
        exit_code: status.code(),
        stdout,
        stderr,
        duration: start.elapsed(),
    })
}
