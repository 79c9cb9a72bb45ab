//! Fenced comment block extraction.
//!
//! A block starts with a `# /// <type>` line, ends with a `# ///` line, and
//! every line in between is either a bare `#` or `# ` followed by text.
//! Anything else between the fences means the region is not a block.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::error::{Pep723Error, Result};

static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^# /// (?P<type>[a-zA-Z0-9-]+)$\s(?P<content>(^#( .*)?$\s)+)^# ///$")
        .unwrap()
});

/// A single fenced region found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Tag following the opening fence (e.g. `script`).
    pub block_type: String,
    /// Lines between the fences, still carrying their `#` prefixes.
    pub content: String,
}

/// Scan `text` for every fenced block, in document order.
///
/// Blocks of any type are returned; duplicates are not an error here.
pub fn extract_blocks(text: &str) -> Vec<RawBlock> {
    let text = unify_line_endings(text);
    let mut blocks = Vec::new();
    let mut start = 0;

    while start <= text.len() {
        let Some(caps) = RE_BLOCK.captures_at(&text, start) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        blocks.push(RawBlock {
            block_type: caps
                .name("type")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            content: caps
                .name("content")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        });

        start = if whole.end() > whole.start() {
            whole.end()
        } else {
            // Empty match: step over one character so the scan always advances
            text[whole.end()..]
                .chars()
                .next()
                .map_or(text.len() + 1, |c| whole.end() + c.len_utf8())
        };
    }

    tracing::debug!("Found {} fenced block(s)", blocks.len());
    blocks
}

/// Find the single block of `wanted_type`.
///
/// Returns `Ok(None)` when no such block exists and
/// [`Pep723Error::MultipleBlocks`] when there is more than one.
pub fn find_block(text: &str, wanted_type: &str) -> Result<Option<RawBlock>> {
    let mut matching: Vec<RawBlock> = extract_blocks(text)
        .into_iter()
        .filter(|block| block.block_type == wanted_type)
        .collect();

    match matching.len() {
        0 | 1 => Ok(matching.pop()),
        count => Err(Pep723Error::MultipleBlocks {
            block_type: wanted_type.to_string(),
            count,
        }),
    }
}

/// Convert CRLF line endings to LF; the block pattern is LF-based.
fn unify_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"#!/usr/bin/env python3
# /// script
# requires-python = ">=3.11"
# dependencies = [
#   "requests<3",
#   "rich",
# ]
# ///

import requests
"#;

    #[test]
    fn extracts_single_block() {
        let blocks = extract_blocks(SCRIPT);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, "script");
        assert!(blocks[0].content.starts_with("# requires-python"));
        assert!(blocks[0].content.ends_with("# ]\n"));
    }

    #[test]
    fn content_excludes_fences() {
        let blocks = extract_blocks(SCRIPT);
        assert!(!blocks[0].content.contains("///"));
    }

    #[test]
    fn bare_hash_lines_belong_to_block() {
        let text = "# /// script\n# dependencies = []\n#\n# requires-python = \">=3\"\n# ///\n";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].content.contains("#\n"));
    }

    #[test]
    fn line_without_space_after_hash_breaks_block() {
        let text = "# /// script\n#dependencies = []\n# ///\n";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn non_comment_line_breaks_block() {
        let text = "# /// script\n# dependencies = []\nimport os\n# ///\n";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn unterminated_block_is_ignored() {
        let text = "# /// script\n# dependencies = []\n";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn end_fence_must_be_exact() {
        let text = "# /// script\n# dependencies = []\n# /// \n";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn type_allows_letters_digits_and_hyphens() {
        let text = "# /// my-tool-2\n# key = 1\n# ///\n";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, "my-tool-2");
    }

    #[test]
    fn type_rejects_underscores() {
        let text = "# /// my_tool\n# key = 1\n# ///\n";
        assert!(extract_blocks(text).is_empty());
    }

    #[test]
    fn extracts_blocks_of_different_types_in_order() {
        let text = "# /// pyproject\n# a = 1\n# ///\n\n# /// script\n# b = 2\n# ///\n";
        let blocks = extract_blocks(text);
        let types: Vec<_> = blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, vec!["pyproject", "script"]);
    }

    #[test]
    fn block_at_end_of_text_without_trailing_newline() {
        let text = "# /// script\n# dependencies = []\n# ///";
        assert_eq!(extract_blocks(text).len(), 1);
    }

    #[test]
    fn crlf_text_is_scanned() {
        let text = "# /// script\r\n# dependencies = [\"rich\"]\r\n# ///\r\n";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "# dependencies = [\"rich\"]\n");
    }

    #[test]
    fn handles_multibyte_text_around_blocks() {
        let text = "# héllo ✓\n# /// script\n# name = \"ünïcode\"\n# ///\n✓";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].content.contains("ünïcode"));
    }

    #[test]
    fn find_block_returns_none_without_match() {
        assert_eq!(find_block("print('hi')\n", "script").unwrap(), None);
    }

    #[test]
    fn find_block_ignores_other_types() {
        let text = "# /// tool\n# a = 1\n# ///\n";
        assert_eq!(find_block(text, "script").unwrap(), None);
    }

    #[test]
    fn find_block_returns_single_match() {
        let block = find_block(SCRIPT, "script").unwrap().unwrap();
        assert_eq!(block.block_type, "script");
    }

    #[test]
    fn find_block_rejects_duplicates() {
        let text = "# /// script\n# a = 1\n# ///\n\n# /// script\n# b = 2\n# ///\n";
        let err = find_block(text, "script").unwrap_err();
        assert!(matches!(
            err,
            Pep723Error::MultipleBlocks { ref block_type, count: 2 } if block_type == "script"
        ));
    }

    #[test]
    fn find_block_allows_duplicates_of_other_types() {
        let text = "# /// tool\n# a = 1\n# ///\n\n# /// tool\n# a = 2\n# ///\n\n# /// script\n# b = 2\n# ///\n";
        assert!(find_block(text, "script").unwrap().is_some());
    }

    #[test]
    fn adjacent_blocks_without_separator_are_one_region() {
        // A closing fence is also a valid comment line, so the content runs
        // greedily up to the last closing fence of the run.
        let text = "# /// tool\n# a = 1\n# ///\n# /// script\n# b = 2\n# ///\n";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, "tool");
        assert!(blocks[0].content.contains("# /// script"));
    }
}
