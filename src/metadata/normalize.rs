//! Comment prefix stripping for block content.

/// Strip the comment prefix from every line of a block's content.
///
/// Lines starting with `#` lose two characters (the `#` and the character
/// after it, normally a space); any other line loses one. A bare `#` line
/// becomes an empty line.
pub fn normalize(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            let prefix_len = if line.starts_with('#') { 2 } else { 1 };
            skip_chars(line, prefix_len)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn skip_chars(line: &str, count: usize) -> &str {
    line.char_indices()
        .nth(count)
        .map_or("", |(idx, _)| &line[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::block::extract_blocks;

    #[test]
    fn strips_hash_and_space() {
        assert_eq!(
            normalize("# requires-python = \">=3.8\"\n"),
            "requires-python = \">=3.8\"\n"
        );
    }

    #[test]
    fn bare_hash_becomes_empty_line() {
        assert_eq!(normalize("# a = 1\n#\n# b = 2\n"), "a = 1\n\nb = 2\n");
    }

    #[test]
    fn trailing_empty_segment_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\n"), "\n");
    }

    #[test]
    fn non_comment_line_loses_one_character() {
        assert_eq!(normalize("xabc"), "abc");
    }

    #[test]
    fn keeps_indentation_after_prefix() {
        assert_eq!(normalize("#   \"rich\",\n"), "  \"rich\",\n");
    }

    #[test]
    fn multibyte_content_is_not_split() {
        assert_eq!(normalize("#é\n# ✓ ok"), "\n✓ ok");
    }

    #[test]
    fn reprefixed_content_extracts_unchanged() {
        let original = "# requires-python = \">=3.9\"\n# dependencies = [\n#   \"httpx\",\n# ]\n";
        let document = format!("# /// script\n{}# ///\n", original);
        let content = &extract_blocks(&document)[0].content;

        let normalized = normalize(content);
        let reprefixed: String = normalized
            .trim_end_matches('\n')
            .lines()
            .map(|line| format!("# {}\n", line))
            .collect();
        let rebuilt = format!("# /// script\n{}# ///\n", reprefixed);

        assert_eq!(&extract_blocks(&rebuilt)[0].content, content);
    }
}
