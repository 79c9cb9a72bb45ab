//! Typed parsing of normalized block content.

use serde::{Deserialize, Serialize};

use crate::error::{Pep723Error, Result};

/// Inline script metadata.
///
/// Both fields are optional: a missing key is distinct from an empty value.
/// Keys other than these two (such as `[tool]` tables) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Version constraint on the interpreter, e.g. `>=3.11`.
    #[serde(
        rename = "requires-python",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub requires_python: Option<String>,

    /// Dependency specifiers in source order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

impl Metadata {
    /// Dependencies to install, empty when the key is absent.
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or_default()
    }
}

/// Parse normalized block content as TOML.
pub fn parse_metadata(normalized: &str) -> Result<Metadata> {
    toml::from_str(normalized).map_err(|e| Pep723Error::MetadataFormat {
        message: e.message().to_string(),
    })
}
