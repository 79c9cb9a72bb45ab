//! Inline script metadata (PEP 723).
//!
//! Metadata lives in a fenced comment block at the top of a script:
//!
//! ```text
//! # /// script
//! # requires-python = ">=3.11"
//! # dependencies = ["requests<3", "rich"]
//! # ///
//! ```
//!
//! # Modules
//!
//! - [`block`] - Locating fenced blocks in document text
//! - [`normalize`] - Stripping comment prefixes from block content
//! - [`parser`] - Parsing normalized content into [`Metadata`]
//!
//! # Example
//!
//! ```
//! use pep723::metadata::read_metadata;
//!
//! let script = "# /// script\n# dependencies = [\"rich\"]\n# ///\nimport rich\n";
//! let metadata = read_metadata(script).unwrap().unwrap();
//! assert_eq!(metadata.dependencies(), ["rich".to_string()]);
//! ```

pub mod block;
pub mod normalize;
pub mod parser;

pub use block::{extract_blocks, find_block, RawBlock};
pub use normalize::normalize;
pub use parser::{parse_metadata, Metadata};

use crate::error::Result;

/// Block type carrying script metadata.
pub const SCRIPT_BLOCK_TYPE: &str = "script";

/// Read the `script` metadata block from a document.
///
/// Returns `Ok(None)` when the document has no `script` block. Errors from
/// extraction (duplicate blocks) and parsing propagate unchanged.
pub fn read_metadata(text: &str) -> Result<Option<Metadata>> {
    let Some(block) = find_block(text, SCRIPT_BLOCK_TYPE)? else {
        return Ok(None);
    };

    let metadata = parse_metadata(&normalize(&block.content))?;
    tracing::debug!(
        "Read script metadata: requires-python={:?}, {} dependencies",
        metadata.requires_python,
        metadata.dependencies().len()
    );
    Ok(Some(metadata))
}
