//! Output verbosity.

use std::str::FromStr;

use crate::config::schema;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including command output.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (spinners + final status).
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl From<schema::OutputMode> for OutputMode {
    fn from(config_mode: schema::OutputMode) -> Self {
        match config_mode {
            schema::OutputMode::Verbose => Self::Verbose,
            schema::OutputMode::Normal => Self::Normal,
            schema::OutputMode::Quiet => Self::Quiet,
            schema::OutputMode::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Pick the mode from CLI flags, falling back to the settings file.
    ///
    /// `--quiet` wins over `--verbose` when both are given.
    pub fn resolve(quiet: bool, verbose: bool, configured: Option<schema::OutputMode>) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            configured.map(Self::from).unwrap_or_default()
        }
    }

    /// Check if this mode shows command output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
