//! Settings file discovery and loading.

use crate::config::merger::merge_configs;
use crate::config::schema::Settings;
use crate::error::{Pep723Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the settings file looked up next to a script.
pub const PROJECT_CONFIG_FILE: &str = ".pep723.yml";

/// Paths to settings files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`<config dir>/pep723/config.yml`)
/// 2. Project config (`.pep723.yml` in the script's directory)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config
    pub user_global: Option<PathBuf>,

    /// Project config next to the script
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files for a script living in `script_dir`.
    pub fn discover(script_dir: &Path) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: Self::find_project_config(script_dir),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("pep723").join("config.yml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    fn find_project_config(script_dir: &Path) -> Option<PathBuf> {
        let path = script_dir.join(PROJECT_CONFIG_FILE);
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Returns all existing settings paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Pep723Error::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Pep723Error::Io(e)
        }
    })
}

/// Load a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<Settings> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| Pep723Error::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a settings file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    serde_yaml::from_str(&content).map_err(|e| Pep723Error::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every settings file that applies to `script_dir`.
///
/// Missing files are not an error; with none present the defaults apply.
pub fn load_merged_settings(script_dir: &Path) -> Result<Settings> {
    load_from_paths(&ConfigPaths::discover(script_dir))
}

fn load_from_paths(paths: &ConfigPaths) -> Result<Settings> {
    let existing = paths.all_existing();
    let mut configs = Vec::with_capacity(existing.len());

    for path in &existing {
        tracing::debug!("Loading settings from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| Pep723Error::ConfigParseError {
        path: existing
            .last()
            .map(|p| p.to_path_buf())
            .unwrap_or_default(),
        message: format!("Failed to parse merged settings: {}", e),
    })
}

/// Load settings with an optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_settings(script_dir: &Path, config_override: Option<&Path>) -> Result<Settings> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_settings(script_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputMode;
    use tempfile::TempDir;

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "confirm: false").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert_eq!(paths.project, Some(temp.path().join(".pep723.yml")));
    }

    #[test]
    fn discover_returns_none_for_missing_project_config() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
    }

    #[test]
    fn all_existing_lists_global_before_project() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths {
            user_global: Some(temp.path().join("global.yml")),
            project: Some(temp.path().join("project.yml")),
        };

        let all = paths.all_existing();
        assert_eq!(all.len(), 2);
        assert!(all[0].ends_with("global.yml"));
        assert!(all[1].ends_with("project.yml"));
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        fs::write(&path, "python: /opt/python/bin/python3\noutput: quiet").unwrap();

        let settings = load_config_file(&path).unwrap();
        assert_eq!(settings.python.as_deref(), Some("/opt/python/bin/python3"));
        assert_eq!(settings.output, Some(OutputMode::Quiet));
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/settings.yml"));
        assert!(matches!(result, Err(Pep723Error::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let result = parse_config("confirm: [", Path::new("test.yml"));
        assert!(matches!(result, Err(Pep723Error::ConfigParseError { .. })));
    }

    #[test]
    fn parse_config_handles_empty_file() {
        let settings = parse_config("", Path::new("empty.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn merged_settings_default_without_files() {
        let paths = ConfigPaths {
            user_global: None,
            project: None,
        };
        assert_eq!(load_from_paths(&paths).unwrap(), Settings::default());
    }

    #[test]
    fn project_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.yml");
        let project = temp.path().join("project.yml");
        fs::write(&global, "python: /usr/bin/python3\nconfirm: false").unwrap();
        fs::write(&project, "python: /opt/venv/bin/python").unwrap();

        let settings = load_from_paths(&ConfigPaths {
            user_global: Some(global),
            project: Some(project),
        })
        .unwrap();

        assert_eq!(settings.python.as_deref(), Some("/opt/venv/bin/python"));
        assert!(!settings.confirm);
    }

    #[test]
    fn project_null_clears_global_python() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.yml");
        let project = temp.path().join("project.yml");
        fs::write(&global, "python: /usr/bin/python3").unwrap();
        fs::write(&project, "python: null").unwrap();

        let settings = load_from_paths(&ConfigPaths {
            user_global: Some(global),
            project: Some(project),
        })
        .unwrap();

        assert!(settings.python.is_none());
    }

    #[test]
    fn empty_project_file_keeps_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.yml");
        let project = temp.path().join("project.yml");
        fs::write(&global, "fallback_python: python3.11").unwrap();
        fs::write(&project, "").unwrap();

        let settings = load_from_paths(&ConfigPaths {
            user_global: Some(global),
            project: Some(project),
        })
        .unwrap();

        assert_eq!(settings.fallback_python, "python3.11");
    }

    #[test]
    fn invalid_merged_value_reports_last_path() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project.yml");
        fs::write(&project, "confirm: maybe").unwrap();

        let err = load_from_paths(&ConfigPaths {
            user_global: None,
            project: Some(project.clone()),
        })
        .unwrap_err();

        assert!(matches!(err, Pep723Error::ConfigParseError { ref path, .. } if *path == project));
    }

    #[test]
    fn load_settings_with_override_skips_discovery() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "confirm: false").unwrap();
        let override_path = temp.path().join("custom.yml");
        fs::write(&override_path, "output: verbose").unwrap();

        let settings = load_settings(temp.path(), Some(&override_path)).unwrap();
        assert!(settings.confirm);
        assert_eq!(settings.output, Some(OutputMode::Verbose));
    }

    #[test]
    fn load_settings_without_override_reads_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "confirm: false").unwrap();

        let settings = load_settings(temp.path(), None).unwrap();
        assert!(!settings.confirm);
    }
}
