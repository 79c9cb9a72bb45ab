//! Optional YAML settings.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use pep723::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".pep723.yml"), "confirm: false").unwrap();
//!
//! let settings = load_settings(temp.path(), None).unwrap();
//! assert!(!settings.confirm);
//! ```
//!
//! # Settings File Locations
//!
//! Settings are discovered and merged in this order:
//! 1. User global config (`<config dir>/pep723/config.yml`)
//! 2. Project config (`.pep723.yml` next to the script)
//!
//! `--config <FILE>` replaces both with a single file.

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    load_config_file, load_config_value, load_merged_settings, load_settings, parse_config,
    ConfigPaths, PROJECT_CONFIG_FILE,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{OutputMode, Settings};
