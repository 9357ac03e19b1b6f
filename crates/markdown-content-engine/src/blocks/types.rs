use super::Inline;
use crate::render::{RenderFormat, html, markup, plain_text};

/// Column alignment of a table, from the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// One item of a bulleted or numbered list.
///
/// Items are not blocks themselves: they group the blocks that make up the
/// item's body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    /// `Some(checked)` for task list items (`- [ ]` / `- [x]`).
    pub task: Option<bool>,
    /// Blocks nested inside the item, in order.
    pub children: Vec<Block>,
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            task: None,
            children,
        }
    }

    pub fn task(checked: bool, children: Vec<Block>) -> Self {
        Self {
            task: Some(checked),
            children,
        }
    }
}

/// A block-level node of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    /// ATX or setext heading, `level` in `1..=6`.
    Heading { level: u8, content: Vec<Inline> },
    /// Container of nested blocks.
    BlockQuote(Vec<Block>),
    BulletedList { tight: bool, items: Vec<ListItem> },
    NumberedList {
        tight: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    /// Fenced or indented code. `info` is the fence info string, if any.
    CodeBlock {
        info: Option<String>,
        content: String,
    },
    HtmlBlock(String),
    /// GFM table. `head` is the header row; each row holds one inline list per cell.
    Table {
        alignments: Vec<ColumnAlignment>,
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    ThematicBreak,
}

impl Block {
    /// A paragraph holding a single text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(vec![Inline::text(text)])
    }

    /// A heading holding a single text node. `level` is clamped to `1..=6`.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            content: vec![Inline::text(text)],
        }
    }

    /// Returns true for blocks that own nested blocks.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Block::BlockQuote(_) | Block::BulletedList { .. } | Block::NumberedList { .. }
        )
    }

    /// Direct child blocks, one level deep.
    ///
    /// Lists contribute the children of every item, in item order. Leaf
    /// blocks have none.
    pub fn children(&self) -> Vec<&Block> {
        match self {
            Block::BlockQuote(children) => children.iter().collect(),
            Block::BulletedList { items, .. } | Block::NumberedList { items, .. } => {
                items.iter().flat_map(|item| item.children.iter()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Appends this block's rendering in `format` to `out`.
    pub fn render_into(&self, format: RenderFormat, out: &mut String) {
        match format {
            RenderFormat::Markup => markup::render_block(self, out),
            RenderFormat::PlainText => plain_text::render_block(self, out),
            RenderFormat::Html => html::render_block(self, out),
        }
    }

    /// This block's rendering in `format`.
    pub fn render(&self, format: RenderFormat) -> String {
        let mut out = String::new();
        self.render_into(format, &mut out);
        out
    }
}
