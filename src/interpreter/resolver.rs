//! Interpreter version lookup.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::process::Command;
use std::sync::LazyLock;

use crate::error::{Pep723Error, Result};

use super::environment::ActiveEnvironment;

/// Command used when no environment source names an interpreter.
pub const DEFAULT_INTERPRETER: &str = "python3";

static RE_PYTHON_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Python (\d+(?:\.\d+)*\S*)").unwrap());

/// The interpreter an install targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterInfo {
    /// Absolute path when the command was found on `PATH`, else as given.
    pub executable: String,
    /// Version reported by `--version`, e.g. `3.11.4`.
    pub version: String,
}

/// Runs an interpreter's version query.
///
/// Abstracted so the rest of the pipeline can be tested without spawning
/// processes.
pub trait VersionQuery {
    /// Run `<executable> --version` and return everything it printed.
    fn version_output(&self, executable: &str) -> Result<String>;
}

/// [`VersionQuery`] backed by a real subprocess.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessVersionQuery;

impl VersionQuery for ProcessVersionQuery {
    fn version_output(&self, executable: &str) -> Result<String> {
        let output = Command::new(executable)
            .arg("--version")
            .output()
            .map_err(|e| Pep723Error::InterpreterInvocation {
                executable: executable.to_string(),
                message: e.to_string(),
            })?;

        // Python 2 prints its version on stderr
        Ok(format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ))
    }
}

/// Pull the version out of `Python X.Y.Z` output.
pub fn parse_version_output(output: &str) -> Option<String> {
    RE_PYTHON_VERSION
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Directories listed in the process `PATH`.
pub fn system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Turn a bare command name into the first executable match in `search_path`.
///
/// Names that already contain a path separator, and names no directory
/// provides, are returned unchanged.
pub fn locate_executable(command: &str, search_path: &[PathBuf]) -> String {
    if command.contains(MAIN_SEPARATOR) || command.contains('/') {
        return command.to_string();
    }
    search_path
        .iter()
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
        .map(|found| found.to_string_lossy().into_owned())
        .unwrap_or_else(|| command.to_string())
}

/// Determine the active interpreter and its version.
///
/// Falls back to [`DEFAULT_INTERPRETER`] when `environment` has no answer.
/// Bare command names are pinned to their location on the process `PATH`,
/// so the install runs the same interpreter that was version-checked.
/// Nothing is cached: every call runs the version query again.
pub fn resolve_interpreter(
    environment: &dyn ActiveEnvironment,
    query: &dyn VersionQuery,
) -> Result<InterpreterInfo> {
    resolve_interpreter_in(environment, query, &system_path())
}

/// [`resolve_interpreter`] with an explicit command search path.
pub fn resolve_interpreter_in(
    environment: &dyn ActiveEnvironment,
    query: &dyn VersionQuery,
    search_path: &[PathBuf],
) -> Result<InterpreterInfo> {
    let requested = environment
        .active_interpreter()
        .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string());
    let executable = locate_executable(&requested, search_path);
    tracing::debug!("Querying interpreter version: {}", executable);

    let output = query.version_output(&executable)?;
    let version =
        parse_version_output(&output).ok_or_else(|| Pep723Error::InterpreterInvocation {
            executable: executable.clone(),
            message: format!("unrecognized version output: {:?}", output.trim()),
        })?;

    tracing::debug!("Resolved interpreter {} ({})", executable, version);
    Ok(InterpreterInfo {
        executable,
        version,
    })
}

/// An environment chain paired with the query used to ask for its version.
pub struct InterpreterResolver {
    environment: Box<dyn ActiveEnvironment>,
    query: Box<dyn VersionQuery>,
    search_path: Vec<PathBuf>,
}

impl InterpreterResolver {
    pub fn new(
        environment: impl ActiveEnvironment + 'static,
        query: impl VersionQuery + 'static,
    ) -> Self {
        Self {
            environment: Box::new(environment),
            query: Box::new(query),
            search_path: system_path(),
        }
    }

    /// Look bare command names up in `search_path` instead of `PATH`.
    pub fn with_search_path(mut self, search_path: Vec<PathBuf>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Resolve the interpreter now. See [`resolve_interpreter`].
    pub fn resolve(&self) -> Result<InterpreterInfo> {
        resolve_interpreter_in(
            self.environment.as_ref(),
            self.query.as_ref(),
            &self.search_path,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::environment::ExplicitInterpreter;
    use std::cell::RefCell;

    /// Query double that records which executables were asked.
    struct FakeQuery {
        output: std::result::Result<String, String>,
        asked: RefCell<Vec<String>>,
    }

    impl FakeQuery {
        fn printing(output: &str) -> Self {
            Self {
                output: Ok(output.to_string()),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                output: Err(message.to_string()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl VersionQuery for FakeQuery {
        fn version_output(&self, executable: &str) -> Result<String> {
            self.asked.borrow_mut().push(executable.to_string());
            self.output
                .clone()
                .map_err(|message| Pep723Error::InterpreterInvocation {
                    executable: executable.to_string(),
                    message,
                })
        }
    }

    #[test]
    fn parses_standard_version_output() {
        assert_eq!(
            parse_version_output("Python 3.11.4\n").as_deref(),
            Some("3.11.4")
        );
    }

    #[test]
    fn parses_prerelease_and_crlf_output() {
        assert_eq!(
            parse_version_output("Python 3.13.0rc1\r\n").as_deref(),
            Some("3.13.0rc1")
        );
    }

    #[test]
    fn rejects_output_without_python_word() {
        assert!(parse_version_output("pypy 7.3").is_none());
        assert!(parse_version_output("").is_none());
    }

    #[test]
    fn falls_back_to_default_interpreter() {
        let query = FakeQuery::printing("Python 3.12.2\n");
        let info = resolve_interpreter_in(&ExplicitInterpreter::new(None), &query, &[]).unwrap();

        assert_eq!(info.executable, DEFAULT_INTERPRETER);
        assert_eq!(info.version, "3.12.2");
        assert_eq!(query.asked.borrow().as_slice(), [DEFAULT_INTERPRETER]);
    }

    #[test]
    fn uses_active_interpreter() {
        let query = FakeQuery::printing("Python 3.10.14\n");
        let env = ExplicitInterpreter::new(Some("/venv/bin/python".into()));
        let info = resolve_interpreter(&env, &query).unwrap();

        assert_eq!(
            info,
            InterpreterInfo {
                executable: "/venv/bin/python".into(),
                version: "3.10.14".into(),
            }
        );
    }

    #[test]
    fn unparsable_output_is_invocation_error() {
        let query = FakeQuery::printing("command not found\n");
        let err =
            resolve_interpreter_in(&ExplicitInterpreter::new(None), &query, &[]).unwrap_err();
        assert!(matches!(
            err,
            Pep723Error::InterpreterInvocation { ref executable, .. } if executable == "python3"
        ));
    }

    #[test]
    fn query_failure_propagates() {
        let query = FakeQuery::failing("No such file or directory");
        let err = resolve_interpreter(&ExplicitInterpreter::new(None), &query).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn every_resolution_runs_the_query() {
        let query = FakeQuery::printing("Python 3.12.2\n");
        let env = ExplicitInterpreter::new(None);
        resolve_interpreter(&env, &query).unwrap();
        resolve_interpreter(&env, &query).unwrap();
        assert_eq!(query.asked.borrow().len(), 2);
    }

    #[test]
    fn resolver_bundles_environment_and_query() {
        let resolver = InterpreterResolver::new(
            ExplicitInterpreter::new(Some("/opt/py/bin/python".into())),
            FakeQuery::printing("Python 3.9.18\n"),
        );
        let info = resolver.resolve().unwrap();
        assert_eq!(info.executable, "/opt/py/bin/python");
        assert_eq!(info.version, "3.9.18");
    }

    #[test]
    fn rejects_words_after_python() {
        let pyenv = "pyenv: python3: command not found\n\n\
                     The `python3' command exists in these Python versions:\n  3.11.4\n";
        assert!(parse_version_output(pyenv).is_none());

        let query = FakeQuery::printing(pyenv);
        let err =
            resolve_interpreter_in(&ExplicitInterpreter::new(None), &query, &[]).unwrap_err();
        assert!(matches!(err, Pep723Error::InterpreterInvocation { .. }));
    }

    #[cfg(unix)]
    fn fake_binary(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn bare_name_is_pinned_to_first_path_match() {
        let temp = tempfile::TempDir::new().unwrap();
        let first = temp.path().join("a");
        let second = temp.path().join("b");
        fake_binary(&first.join("python3"));
        fake_binary(&second.join("python3"));

        let query = FakeQuery::printing("Python 3.11.4\n");
        let info = resolve_interpreter_in(
            &ExplicitInterpreter::new(None),
            &query,
            &[first.clone(), second],
        )
        .unwrap();

        let expected = first.join("python3").to_string_lossy().into_owned();
        assert_eq!(info.executable, expected);
        assert_eq!(query.asked.borrow().as_slice(), [expected]);
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_candidates_are_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        let plain = temp.path().join("plain");
        std::fs::create_dir_all(&plain).unwrap();
        std::fs::write(plain.join("python3"), "").unwrap();
        let real = temp.path().join("real");
        fake_binary(&real.join("python3"));

        assert_eq!(
            locate_executable("python3", &[plain, real.clone()]),
            real.join("python3").to_string_lossy()
        );
    }

    #[test]
    fn paths_and_unknown_names_are_unchanged() {
        assert_eq!(
            locate_executable("/opt/py/bin/python", &system_path()),
            "/opt/py/bin/python"
        );
        assert_eq!(
            locate_executable("no-such-python-12345", &system_path()),
            "no-such-python-12345"
        );
    }

    #[test]
    fn missing_executable_is_invocation_error() {
        let err = ProcessVersionQuery
            .version_output("this-interpreter-does-not-exist-12345")
            .unwrap_err();
        assert!(matches!(err, Pep723Error::InterpreterInvocation { .. }));
    }
}
