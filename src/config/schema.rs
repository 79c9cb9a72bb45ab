//! Settings file schema.
//!
//! ```yaml
//! python: /opt/venvs/tools/bin/python
//! fallback_python: python3
//! confirm: false
//! output: quiet
//! ```

use serde::{Deserialize, Serialize};

use crate::interpreter::DEFAULT_INTERPRETER;

/// Merged settings from every settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interpreter to use instead of the detected environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Interpreter used when nothing else names one.
    pub fallback_python: String,

    /// Ask before running the install command.
    pub confirm: bool,

    /// Output verbosity when no CLI flag is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            python: None,
            fallback_python: DEFAULT_INTERPRETER.to_string(),
            confirm: true,
            output: None,
        }
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Normal,
    Quiet,
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(settings.python.is_none());
        assert_eq!(settings.fallback_python, "python3");
        assert!(settings.confirm);
        assert!(settings.output.is_none());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let settings: Settings = serde_yaml::from_str("confirm: false").unwrap();
        assert!(!settings.confirm);
        assert_eq!(settings.fallback_python, "python3");
    }

    #[test]
    fn parses_every_key() {
        let settings: Settings = serde_yaml::from_str(
            r#"
python: /opt/venv/bin/python
fallback_python: python3.12
confirm: false
output: silent
"#,
        )
        .unwrap();

        assert_eq!(settings.python.as_deref(), Some("/opt/venv/bin/python"));
        assert_eq!(settings.fallback_python, "python3.12");
        assert!(!settings.confirm);
        assert_eq!(settings.output, Some(OutputMode::Silent));
    }

    #[test]
    fn rejects_unknown_output_mode() {
        let result: std::result::Result<Settings, _> = serde_yaml::from_str("output: loud");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_without_unset_keys() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        assert!(!yaml.lines().any(|l| l.starts_with("python:")));
        assert!(yaml.contains("fallback_python: python3"));
        assert!(!yaml.contains("output"));
    }
}
