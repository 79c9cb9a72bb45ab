//! Install decisions.
//!
//! Installation is gated on `requires-python`: a script without a version
//! constraint is never installed, even if it lists dependencies.

use serde::Serialize;

use crate::interpreter::InterpreterInfo;
use crate::metadata::Metadata;

/// Leading arguments of every install command.
pub const PIP_INSTALL_ARGS: [&str; 3] = ["-m", "pip", "install"];

/// A concrete install command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    /// Interpreter to run.
    pub executable: String,
    /// `-m pip install` followed by one quoted argument per dependency.
    pub arguments: Vec<String>,
}

impl InstallPlan {
    /// Render the plan as a shell command line.
    pub fn command_line(&self) -> String {
        let executable = if self.executable.chars().all(is_shell_safe) {
            self.executable.clone()
        } else {
            quote_argument(&self.executable)
        };
        std::iter::once(executable)
            .chain(self.arguments.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of checking metadata against an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallDecision {
    /// No `requires-python`; nothing is attempted.
    NoVersionConstraint,
    /// The interpreter does not satisfy `requires-python`.
    UnmetConstraint { required: String, found: String },
    /// Constraint satisfied, but there are no dependencies.
    NothingToInstall,
    /// Run this command.
    Install(InstallPlan),
}

impl InstallDecision {
    /// The plan to run, if any.
    pub fn into_plan(self) -> Option<InstallPlan> {
        match self {
            InstallDecision::Install(plan) => Some(plan),
            _ => None,
        }
    }

    /// Message to show the user, for outcomes that need one.
    pub fn user_message(&self) -> Option<String> {
        match self {
            InstallDecision::UnmetConstraint { required, .. } => {
                Some(format!("The current script requires python {}", required))
            }
            _ => None,
        }
    }
}

/// Decide what to do for `metadata` on `interpreter`.
///
/// `satisfies(version, constraint)` is injected so the decision does not
/// depend on a particular constraint grammar.
pub fn decide_install<F>(
    metadata: &Metadata,
    interpreter: &InterpreterInfo,
    satisfies: F,
) -> InstallDecision
where
    F: Fn(&str, &str) -> bool,
{
    let Some(required) = metadata.requires_python.as_deref() else {
        return InstallDecision::NoVersionConstraint;
    };

    if !satisfies(&interpreter.version, required) {
        return InstallDecision::UnmetConstraint {
            required: required.to_string(),
            found: interpreter.version.clone(),
        };
    }

    let dependencies = metadata.dependencies();
    if dependencies.is_empty() {
        return InstallDecision::NothingToInstall;
    }

    let arguments = PIP_INSTALL_ARGS
        .iter()
        .map(|arg| arg.to_string())
        .chain(dependencies.iter().map(|dep| quote_argument(dep)))
        .collect();

    InstallDecision::Install(InstallPlan {
        executable: interpreter.executable.clone(),
        arguments,
    })
}

/// The install plan for `metadata` on `interpreter`, if any.
pub fn plan_install<F>(
    metadata: &Metadata,
    interpreter: &InterpreterInfo,
    satisfies: F,
) -> Option<InstallPlan>
where
    F: Fn(&str, &str) -> bool,
{
    decide_install(metadata, interpreter, satisfies).into_plan()
}

/// Characters a shell passes through unquoted.
fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '.' | '/' | '-' | '+' | ':' | '@' | '%' | '=' | ',')
}

/// Wrap `arg` in double quotes for a POSIX shell.
///
/// Characters that stay special inside double quotes are backslash-escaped.
pub fn quote_argument(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
