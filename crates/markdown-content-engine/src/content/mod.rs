//! # Content Value
//!
//! [`Content`] is the immutable document model: one [`BlockSequence`] plus
//! the operations over it (rendering, stepping into containers, search).
//!
//! ```rust
//! use markdown_content_engine::{Content, RenderFormat};
//!
//! let content = Content::parse("# Hello\n\nSome *text*.");
//! assert_eq!(content.render(RenderFormat::PlainText), "Hello\nSome text.");
//!
//! let results = content.search("text");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].block_index, 1);
//! ```

mod sequence;

pub use sequence::BlockSequence;

use std::convert::Infallible;
use std::str::FromStr;

use crate::blocks::Block;
use crate::parsing::parse_blocks;
use crate::render::{RenderFormat, render_blocks, strip_trailing_line_terminator};
use crate::search::{SearchOptions, SearchResult, search};

/// A parsed document: an immutable sequence of blocks.
///
/// Equality is structural. Cloning shares the underlying blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    blocks: BlockSequence,
}

impl Content {
    /// Parses Markdown source.
    pub fn parse(source: &str) -> Self {
        Self::from_blocks(parse_blocks(source))
    }

    pub fn from_blocks(blocks: impl Into<BlockSequence>) -> Self {
        Self {
            blocks: blocks.into(),
        }
    }

    /// Concatenates contents in order. Empty contents contribute nothing.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        let parts: Vec<Content> = parts.into_iter().map(Into::into).collect();
        Self {
            blocks: BlockSequence::concat(parts.iter().map(|part| &part.blocks)),
        }
    }

    pub fn blocks(&self) -> &BlockSequence {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Renders every block in `format` and concatenates the results.
    ///
    /// Markup and plain text lose exactly one trailing line terminator; HTML
    /// is returned as produced.
    pub fn render(&self, format: RenderFormat) -> String {
        let mut out = String::new();
        render_blocks(&self.blocks, format, &mut out);
        if format.strips_trailing_newline() {
            strip_trailing_line_terminator(&mut out);
        }
        out
    }

    pub fn render_markup(&self) -> String {
        self.render(RenderFormat::Markup)
    }

    pub fn render_plain_text(&self) -> String {
        self.render(RenderFormat::PlainText)
    }

    pub fn render_html(&self) -> String {
        self.render(RenderFormat::Html)
    }

    /// The direct children of every container block, as a new content.
    ///
    /// Returns `None` when no block has children.
    pub fn child_content(&self) -> Option<Content> {
        self.blocks.flatten_children().map(Content::from_blocks)
    }

    /// Case-insensitive search with default options.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search(self, query, &SearchOptions::default())
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        search(self, query, options)
    }
}

impl From<Block> for Content {
    fn from(block: Block) -> Self {
        Self::from_blocks(vec![block])
    }
}

impl From<Vec<Block>> for Content {
    fn from(blocks: Vec<Block>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl From<BlockSequence> for Content {
    fn from(blocks: BlockSequence) -> Self {
        Self { blocks }
    }
}

impl From<&str> for Content {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for Content {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

impl FromStr for Content {
    type Err = Infallible;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(source))
    }
}

impl FromIterator<Content> for Content {
    fn from_iter<I: IntoIterator<Item = Content>>(iter: I) -> Self {
        Self::concat(iter)
    }
}

impl<'c> IntoIterator for &'c Content {
    type Item = &'c Block;
    type IntoIter = std::slice::Iter<'c, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
