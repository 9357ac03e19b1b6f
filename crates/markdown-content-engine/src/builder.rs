//! Programmatic construction of [`Content`] from mixed parts.
//!
//! Literal strings are parsed as Markdown, blocks are appended as-is and
//! other contents contribute their blocks. Order is preserved.
//!
//! ```rust
//! use markdown_content_engine::{Block, Content, ContentBuilder, content};
//!
//! let built = ContentBuilder::new()
//!     .push("# Notes")
//!     .push(Block::paragraph("First"))
//!     .push(Content::parse("Second"))
//!     .build();
//! assert_eq!(built.render_plain_text(), "Notes\nFirst\nSecond");
//!
//! let same = content!["# Notes", Block::paragraph("First"), "Second"];
//! assert_eq!(same, built);
//! ```

use crate::blocks::Block;
use crate::content::Content;

/// Append-only builder for [`Content`].
#[derive(Debug, Default, Clone)]
pub struct ContentBuilder {
    blocks: Vec<Block>,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the blocks of anything convertible into content.
    #[must_use]
    pub fn push(mut self, part: impl Into<Content>) -> Self {
        self.extend_from(part);
        self
    }

    /// Appends a block.
    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends Markdown source, parsed.
    #[must_use]
    pub fn markdown(self, source: &str) -> Self {
        self.push(Content::parse(source))
    }

    /// Appends in place, for use in loops.
    pub fn extend_from(&mut self, part: impl Into<Content>) {
        let part: Content = part.into();
        self.blocks.extend(part.blocks().iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn build(self) -> Content {
        Content::from_blocks(self.blocks)
    }
}

impl<P: Into<Content>> Extend<P> for ContentBuilder {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for part in iter {
            self.extend_from(part);
        }
    }
}

/// Builds [`Content`] from a list of parts convertible into content.
#[macro_export]
macro_rules! content {
    () => {
        $crate::Content::default()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::Content::concat([$($crate::Content::from($part)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ListItem;

    #[test]
    fn builder_preserves_part_order() {
        let content = ContentBuilder::new()
            .block(Block::heading(2, "Title"))
            .markdown("para one\n\npara two")
            .push(Block::ThematicBreak)
            .build();
        assert_eq!(content.len(), 4);
        assert_eq!(content.blocks()[0], Block::heading(2, "Title"));
        assert_eq!(content.blocks()[3], Block::ThematicBreak);
    }

    #[test]
    fn empty_builder_builds_empty_content() {
        let builder = ContentBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.build(), Content::default());
        assert_eq!(content![], Content::default());
    }

    #[test]
    fn extend_accepts_iterators() {
        let mut builder = ContentBuilder::new();
        builder.extend(["a", "b", "c"]);
        assert_eq!(builder.build().render_plain_text(), "a\nb\nc");
    }

    #[test]
    fn macro_mixes_part_kinds() {
        let list = Block::BulletedList {
            tight: true,
            items: vec![ListItem::new(vec![Block::paragraph("item")])],
        };
        let content = content!["intro", list.clone(), Content::parse("outro")];
        assert_eq!(
            content,
            Content::from(vec![Block::paragraph("intro"), list, Block::paragraph("outro")])
        );
    }
}
