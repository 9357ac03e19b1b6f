//! Grapheme-cluster offsets over UTF-8 text.
//!
//! Search offsets count user-perceived characters (extended grapheme
//! clusters), never bytes. `GraphemeText` converts between the two.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Number of grapheme clusters in `text`.
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// A borrowed string with its grapheme boundaries precomputed.
#[derive(Debug, Clone)]
pub struct GraphemeText<'a> {
    text: &'a str,
    /// Byte offset where each grapheme starts, followed by `text.len()`.
    boundaries: Vec<usize>,
}

impl<'a> GraphemeText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Number of grapheme clusters.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts a grapheme range to a byte range.
    ///
    /// Returns `None` if the range is inverted or extends past the end.
    pub fn byte_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        if range.start > range.end || range.end > self.len() {
            return None;
        }
        Some(self.boundaries[range.start]..self.boundaries[range.end])
    }

    /// The substring covering a grapheme range.
    pub fn slice(&self, range: Range<usize>) -> Option<&'a str> {
        self.byte_range(range).map(|bytes| &self.text[bytes])
    }

    /// Iterates over the grapheme clusters.
    pub fn graphemes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.boundaries
            .windows(2)
            .map(|pair| &self.text[pair[0]..pair[1]])
    }
}
