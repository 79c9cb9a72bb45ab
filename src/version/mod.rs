//! Interpreter version checks against `requires-python` constraints.
//!
//! - [`specifier`] - PEP 440 version and specifier-set parsing

pub mod specifier;

pub use specifier::{Operator, PreRelease, Specifier, SpecifierError, SpecifierSet, Version};

/// Check whether `version` satisfies the PEP 440 `constraint`.
///
/// An unparsable version or constraint never satisfies; the problem is
/// logged so the user-facing "requires python" message is not the only clue.
pub fn satisfies(version: &str, constraint: &str) -> bool {
    let candidate: Version = match version.parse() {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Cannot check interpreter version: {}", e);
            return false;
        }
    };
    let specifiers: SpecifierSet = match constraint.parse() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Cannot check requires-python: {}", e);
            return false;
        }
    };
    specifiers.contains(&candidate)
}
