//! Documents and the status indicator they drive.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Fixed label of the install indicator.
pub const STATUS_LABEL: &str = "Install [PEP723]";

/// A script as the session sees it: identity plus full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path of the script; the session's cache key.
    pub id: PathBuf,
    /// Current document text.
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Read a script from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path, text))
    }

    /// Whether this is a Python script.
    ///
    /// Decided by a `.py`/`.pyw` extension, or a shebang naming python.
    pub fn is_python(&self) -> bool {
        let by_extension = self
            .id
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("py") || ext.eq_ignore_ascii_case("pyw"));

        by_extension || has_python_shebang(&self.text)
    }
}

fn has_python_shebang(text: &str) -> bool {
    text.lines()
        .next()
        .is_some_and(|first| first.starts_with("#!") && first.contains("python"))
}

/// State of the install indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusItem {
    /// Whether the indicator is shown.
    pub visible: bool,
    /// Label shown when visible.
    pub label: &'static str,
}

impl StatusItem {
    pub fn shown() -> Self {
        Self {
            visible: true,
            label: STATUS_LABEL,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            label: STATUS_LABEL,
        }
    }
}
