use serde::{Deserialize, Serialize};
use std::ops::Range;
use uuid::Uuid;

use super::snippet::snippet;
use super::text::GraphemeText;

/// One search hit.
///
/// `block_text` is a snapshot of the block's plain text taken at search time;
/// `match_range` counts grapheme clusters into it. Both lose their meaning if
/// interpreted against a different content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Random identity for UI list diffing. Unique within one search call.
    pub id: Uuid,
    /// Index of the matching block in the searched content.
    pub block_index: usize,
    pub block_text: String,
    /// Half-open `[start, end)` in graphemes.
    pub match_range: Range<usize>,
    /// Context around the match, ellipsis-marked where truncated.
    pub snippet: String,
}

impl SearchResult {
    /// Builds a result with a fresh random id and a computed snippet.
    pub fn new(
        block_index: usize,
        block_text: impl Into<String>,
        match_range: Range<usize>,
        context_length: usize,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            block_index,
            block_text,
            match_range,
            context_length,
        )
    }

    pub fn with_id(
        id: Uuid,
        block_index: usize,
        block_text: impl Into<String>,
        match_range: Range<usize>,
        context_length: usize,
    ) -> Self {
        let block_text = block_text.into();
        let snippet = snippet(&block_text, match_range.clone(), context_length);
        Self {
            id,
            block_index,
            block_text,
            match_range,
            snippet,
        }
    }

    /// Handle for scroll-to-match: the block index.
    pub fn scroll_id(&self) -> usize {
        self.block_index
    }

    /// Byte range of the match within `block_text`.
    ///
    /// `None` when `match_range` is inverted or runs past the end of the
    /// text, which only happens for results constructed by hand.
    pub fn range_in_block_text(&self) -> Option<Range<usize>> {
        GraphemeText::new(&self.block_text).byte_range(self.match_range.clone())
    }

    /// The matched substring, or `""` when the range is invalid.
    pub fn matched_text(&self) -> &str {
        self.range_in_block_text()
            .and_then(|bytes| self.block_text.get(bytes))
            .unwrap_or("")
    }
}
