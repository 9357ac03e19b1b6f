use std::ops::Range;

use super::text::GraphemeText;

/// Context kept on each side of a match unless configured otherwise.
pub const DEFAULT_CONTEXT_LENGTH: usize = 32;

/// Marks text cut off at either end of a snippet.
pub const ELLIPSIS: char = '…';

/// Extracts a context window around `match_range` (grapheme offsets).
///
/// The window extends `context_length` graphemes before the match start and
/// after the match end, clamped to the text. An ellipsis is prepended when
/// the window starts after the beginning of the text and appended when it
/// ends before the end.
pub fn snippet(full_text: &str, match_range: Range<usize>, context_length: usize) -> String {
    let text = GraphemeText::new(full_text);
    let len = text.len();
    if len == 0 {
        return String::new();
    }

    let start = match_range.start.min(len);
    let end = match_range.end.clamp(start, len);
    let lower = start.saturating_sub(context_length);
    let upper = end.saturating_add(context_length).min(len);

    let window = text.slice(lower..upper).unwrap_or_default();
    let mut out = String::with_capacity(window.len() + 2 * ELLIPSIS.len_utf8());
    if lower > 0 {
        out.push(ELLIPSIS);
    }
    out.push_str(window);
    if upper < len {
        out.push(ELLIPSIS);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn leading_context_only() {
        assert_eq!(snippet("hello world", 6..11, 3), "…lo world");
    }

    #[rstest]
    #[case("hello world", 0..5, 3, "hello wo…")]
    #[case("hello world", 4..7, 1, "…lo wo…")]
    #[case("hello world", 0..11, 0, "hello world")]
    #[case("hello world", 6..11, 32, "hello world")]
    #[case("hello world", 5..6, 0, "… …")]
    fn windows(
        #[case] text: &str,
        #[case] range: Range<usize>,
        #[case] context: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(snippet(text, range, context), expected);
    }

    #[test]
    fn empty_text_has_no_ellipses() {
        assert_eq!(snippet("", 0..0, DEFAULT_CONTEXT_LENGTH), "");
    }

    #[test]
    fn out_of_range_match_is_clamped() {
        assert_eq!(snippet("abc", 5..9, 1), "…c");
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        // Three graphemes of context before "x": "e\u{301}", "e\u{301}", "e\u{301}"
        let text = "ae\u{301}e\u{301}e\u{301}x";
        assert_eq!(snippet(text, 4..5, 3), "…e\u{301}e\u{301}e\u{301}x");
    }
}
