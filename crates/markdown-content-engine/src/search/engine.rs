use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use super::options::{Folder, SearchOptions};
use super::result::SearchResult;
use crate::blocks::Block;
use crate::content::Content;
use crate::render::{RenderFormat, strip_trailing_line_terminator};

/// Finds every non-overlapping occurrence of `query` in the plain text of
/// each block.
///
/// The query is trimmed first; a blank query yields no results. Results are
/// ordered by block index, then by match start.
pub fn search(content: &Content, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        log::debug!("blank query, skipping search");
        return Vec::new();
    }

    let folder = Folder::new(options);
    let needle: Vec<String> = query.graphemes(true).map(|g| folder.fold(g)).collect();

    let mut results = Vec::new();
    for (block_index, block) in content.blocks().iter().enumerate() {
        let block_text = block_plain_text(block);
        if block_text.is_empty() {
            continue;
        }
        for range in find_matches(&block_text, &needle, &folder) {
            log::trace!("match in block {block_index} at {range:?}");
            results.push(SearchResult::new(
                block_index,
                block_text.as_str(),
                range,
                options.context_length,
            ));
        }
    }

    log::debug!(
        "search for {query:?} found {} matches in {} blocks",
        results.len(),
        content.len()
    );
    results
}

/// A block's plain text with one trailing line terminator removed, matching
/// how the whole document is rendered.
pub fn block_plain_text(block: &Block) -> String {
    let mut text = block.render(RenderFormat::PlainText);
    strip_trailing_line_terminator(&mut text);
    text
}

/// Grapheme ranges of sequential, non-overlapping matches of `needle`.
fn find_matches(text: &str, needle: &[String], folder: &Folder) -> Vec<Range<usize>> {
    let haystack: Vec<String> = text.graphemes(true).map(|g| folder.fold(g)).collect();
    let width = needle.len();
    let mut matches = Vec::new();
    if width == 0 || width > haystack.len() {
        return matches;
    }

    let mut cursor = 0;
    while cursor + width <= haystack.len() {
        let found = (cursor..=haystack.len() - width)
            .find(|&start| haystack[start..start + width] == *needle);
        match found {
            Some(start) => {
                matches.push(start..start + width);
                cursor = start + width;
            }
            None => break,
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CompareOptions;

    fn ranges(text: &str, query: &str) -> Vec<Range<usize>> {
        let options = SearchOptions::default();
        let folder = Folder::new(&options);
        let needle: Vec<String> = query.graphemes(true).map(|g| folder.fold(g)).collect();
        find_matches(text, &needle, &folder)
    }

    #[test]
    fn matches_do_not_overlap() {
        assert_eq!(ranges("aaaa", "aa"), vec![0..2, 2..4]);
        assert_eq!(ranges("aaa", "aa"), vec![0..2]);
    }

    #[test]
    fn no_match_when_needle_is_longer() {
        assert!(ranges("ab", "abc").is_empty());
    }

    #[test]
    fn offsets_are_graphemes() {
        assert_eq!(ranges("e\u{301}te\u{301}", "t"), vec![1..2]);
    }

    #[test]
    fn partial_grapheme_does_not_match() {
        // "e" alone must not match the "e" inside "e" + combining accent
        assert!(ranges("e\u{301}", "e").is_empty());
    }

    #[test]
    fn case_sensitivity_is_honored() {
        let content = Content::parse("Rust rust RUST");
        assert_eq!(content.search("rust").len(), 3);
        let exact = SearchOptions::default().with_compare(CompareOptions::LITERAL);
        assert_eq!(content.search_with("rust", &exact).len(), 1);
    }

    #[test]
    fn block_text_drops_trailing_newline() {
        assert_eq!(block_plain_text(&Block::paragraph("hi")), "hi");
        assert_eq!(block_plain_text(&Block::ThematicBreak), "");
    }
}
