//! # Markdown Parsing
//!
//! Builds the [`Block`] tree from `pulldown-cmark`'s event stream.
//!
//! The event stream is flat (`Start(tag)` ... `End(tag)`), so the parser is a
//! small recursive descent over a peekable iterator: each `Start` of a
//! container recurses until its matching `End`.
//!
//! Tight list items arrive without paragraph tags; their loose inline runs are
//! wrapped into paragraphs and the list is marked tight.

use std::iter::Peekable;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::blocks::{Block, ColumnAlignment, Inline, ListItem};

/// Extensions enabled on top of CommonMark.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parses Markdown source into its block sequence. Never fails: any input is
/// valid Markdown.
pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut parser = BlockParser::new(source);
    let (blocks, _) = parser.blocks();
    log::debug!(
        "parsed {} top-level blocks from {} bytes",
        blocks.len(),
        source.len()
    );
    blocks
}

struct BlockParser<'a> {
    events: Peekable<Parser<'a>>,
    /// Task marker seen inside the innermost open list item.
    task: Option<bool>,
}

impl<'a> BlockParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            events: Parser::new_ext(source, parser_options()).peekable(),
            task: None,
        }
    }

    /// Parses blocks until the enclosing `End` (consumed) or end of input.
    ///
    /// The flag is false when any paragraph at this level was explicitly
    /// tagged, which is how loose list items present themselves.
    fn blocks(&mut self) -> (Vec<Block>, bool) {
        let mut blocks = Vec::new();
        let mut tight = true;

        loop {
            let (is_end, inline) = match self.events.peek() {
                None => break,
                Some(event) => (matches!(event, Event::End(_)), is_inline(event)),
            };
            if is_end {
                self.events.next();
                break;
            }
            if inline {
                let content = self.loose_inlines();
                if !content.is_empty() {
                    blocks.push(Block::Paragraph(content));
                }
                continue;
            }

            let Some(event) = self.events.next() else {
                break;
            };
            match event {
                Event::Start(Tag::Paragraph) => {
                    tight = false;
                    blocks.push(Block::Paragraph(self.inlines()));
                }
                Event::Start(tag) => {
                    if let Some(block) = self.block(tag) {
                        blocks.push(block);
                    }
                }
                Event::Rule => blocks.push(Block::ThematicBreak),
                Event::Html(raw) => blocks.push(Block::HtmlBlock(raw.into_string())),
                Event::TaskListMarker(checked) => self.task = Some(checked),
                _ => {}
            }
        }

        (blocks, tight)
    }

    fn block(&mut self, tag: Tag<'a>) -> Option<Block> {
        match tag {
            Tag::Heading { level, .. } => Some(Block::Heading {
                level: heading_level(level),
                content: self.inlines(),
            }),
            Tag::BlockQuote(_) => Some(Block::BlockQuote(self.blocks().0)),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                        Some(info.trim().to_string())
                    }
                    _ => None,
                };
                Some(Block::CodeBlock {
                    info,
                    content: self.raw_text(),
                })
            }
            Tag::HtmlBlock => Some(Block::HtmlBlock(self.raw_text())),
            Tag::List(start) => Some(self.list(start)),
            Tag::Table(alignments) => Some(self.table(&alignments)),
            _ => {
                // Footnote definitions, metadata blocks and the like.
                self.skip_to_end();
                None
            }
        }
    }

    fn list(&mut self, start: Option<u64>) -> Block {
        let mut items = Vec::new();
        let mut tight = true;

        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::Item) => {
                    let outer = self.task.take();
                    let (children, item_tight) = self.blocks();
                    tight &= item_tight;
                    let task = std::mem::replace(&mut self.task, outer);
                    items.push(ListItem { task, children });
                }
                Event::End(_) => break,
                _ => {}
            }
        }

        match start {
            Some(start) => Block::NumberedList {
                tight,
                start,
                items,
            },
            None => Block::BulletedList { tight, items },
        }
    }

    fn table(&mut self, alignments: &[Alignment]) -> Block {
        let mut head = Vec::new();
        let mut rows = Vec::new();

        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::TableHead) => head = self.table_cells(),
                Event::Start(Tag::TableRow) => rows.push(self.table_cells()),
                Event::End(_) => break,
                _ => {}
            }
        }

        Block::Table {
            alignments: alignments.iter().map(column_alignment).collect(),
            head,
            rows,
        }
    }

    fn table_cells(&mut self) -> Vec<Vec<Inline>> {
        let mut cells = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::TableCell) => cells.push(self.inlines()),
                Event::Start(Tag::TableRow) => cells.extend(self.table_cells()),
                Event::End(_) => break,
                _ => {}
            }
        }
        cells
    }

    /// Parses inlines until the enclosing `End` (consumed).
    fn inlines(&mut self) -> Vec<Inline> {
        let mut out = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::End(_) => break,
                other => self.push_inline(other, &mut out),
            }
        }
        out
    }

    /// Parses an untagged run of inlines, stopping before the next block event.
    fn loose_inlines(&mut self) -> Vec<Inline> {
        let mut out = Vec::new();
        while self.events.peek().is_some_and(is_inline) {
            if let Some(event) = self.events.next() {
                self.push_inline(event, &mut out);
            }
        }
        out
    }

    fn push_inline(&mut self, event: Event<'a>, out: &mut Vec<Inline>) {
        match event {
            Event::Text(text) => push_text(&text, out),
            Event::Code(code) => out.push(Inline::Code(code.into_string())),
            Event::InlineHtml(raw) | Event::Html(raw) => out.push(Inline::Html(raw.into_string())),
            Event::SoftBreak => out.push(Inline::SoftBreak),
            Event::HardBreak => out.push(Inline::LineBreak),
            Event::FootnoteReference(label) => push_text(&format!("[^{label}]"), out),
            Event::TaskListMarker(checked) => self.task = Some(checked),
            Event::Start(Tag::Emphasis) => out.push(Inline::Emphasis(self.inlines())),
            Event::Start(Tag::Strong) => out.push(Inline::Strong(self.inlines())),
            Event::Start(Tag::Strikethrough) => out.push(Inline::Strikethrough(self.inlines())),
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => out.push(Inline::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
                children: self.inlines(),
            }),
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => out.push(Inline::Image {
                source: dest_url.into_string(),
                title: title.into_string(),
                alt: self.inlines(),
            }),
            Event::Start(_) => {
                let nested = self.inlines();
                for inline in nested {
                    match inline {
                        Inline::Text(text) => push_text(&text, out),
                        other => out.push(other),
                    }
                }
            }
            _ => {}
        }
    }

    /// Concatenates text until the enclosing `End` (consumed).
    fn raw_text(&mut self) -> String {
        let mut out = String::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Text(text) | Event::Html(text) => out.push_str(&text),
                Event::End(_) => break,
                _ => {}
            }
        }
        out
    }

    fn skip_to_end(&mut self) {
        let mut depth = 0usize;
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                _ => {}
            }
        }
    }
}

fn is_inline(event: &Event<'_>) -> bool {
    match event {
        Event::Text(_)
        | Event::Code(_)
        | Event::InlineHtml(_)
        | Event::SoftBreak
        | Event::HardBreak
        | Event::FootnoteReference(_) => true,
        Event::Start(tag) => matches!(
            tag,
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
        ),
        _ => false,
    }
}

/// Appends text, merging with a preceding text node.
fn push_text(text: &str, out: &mut Vec<Inline>) {
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn column_alignment(alignment: &Alignment) -> ColumnAlignment {
    match alignment {
        Alignment::None => ColumnAlignment::None,
        Alignment::Left => ColumnAlignment::Left,
        Alignment::Center => ColumnAlignment::Center,
        Alignment::Right => ColumnAlignment::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_heading_and_paragraph() {
        let blocks = parse_blocks("# Title\n\nSome *text* here.\n");
        assert_eq!(
            blocks,
            vec![
                Block::heading(1, "Title"),
                Block::Paragraph(vec![
                    Inline::text("Some "),
                    Inline::Emphasis(vec![Inline::text("text")]),
                    Inline::text(" here."),
                ]),
            ]
        );
    }

    #[test]
    fn tight_list_items_become_paragraphs() {
        let blocks = parse_blocks("- one\n- two\n");
        assert_eq!(
            blocks,
            vec![Block::BulletedList {
                tight: true,
                items: vec![
                    ListItem::new(vec![Block::paragraph("one")]),
                    ListItem::new(vec![Block::paragraph("two")]),
                ],
            }]
        );
    }

    #[test]
    fn loose_list_is_marked_loose() {
        let blocks = parse_blocks("1. one\n\n2. two\n");
        assert!(matches!(
            blocks.as_slice(),
            [Block::NumberedList {
                tight: false,
                start: 1,
                ..
            }]
        ));
    }

    #[test]
    fn task_markers_are_attached_to_items() {
        let blocks = parse_blocks("- [x] done\n- [ ] todo\n- plain\n");
        let Block::BulletedList { items, .. } = &blocks[0] else {
            panic!("expected a list, got {blocks:?}");
        };
        let tasks: Vec<Option<bool>> = items.iter().map(|item| item.task).collect();
        assert_eq!(tasks, vec![Some(true), Some(false), None]);
        assert_eq!(items[0].children, vec![Block::paragraph("done")]);
    }

    #[test]
    fn nested_task_marker_does_not_leak_to_parent() {
        let blocks = parse_blocks("- parent\n  - [x] child\n");
        let Block::BulletedList { items, .. } = &blocks[0] else {
            panic!("expected a list, got {blocks:?}");
        };
        assert_eq!(items[0].task, None);
        let Block::BulletedList { items: nested, .. } = &items[0].children[1] else {
            panic!("expected a nested list");
        };
        assert_eq!(nested[0].task, Some(true));
    }

    #[test]
    fn block_quote_holds_children() {
        let blocks = parse_blocks("> a\n>\n> b\n");
        assert_eq!(
            blocks,
            vec![Block::BlockQuote(vec![
                Block::paragraph("a"),
                Block::paragraph("b"),
            ])]
        );
    }

    #[test]
    fn fenced_code_keeps_info_and_content() {
        let blocks = parse_blocks("```rust\nfn main() {}\n```\n");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                info: Some("rust".to_string()),
                content: "fn main() {}\n".to_string(),
            }]
        );
    }

    #[test]
    fn parses_table() {
        let blocks = parse_blocks("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        assert_eq!(
            blocks,
            vec![Block::Table {
                alignments: vec![ColumnAlignment::Left, ColumnAlignment::Right],
                head: vec![vec![Inline::text("a")], vec![Inline::text("b")]],
                rows: vec![vec![vec![Inline::text("1")], vec![Inline::text("2")]]],
            }]
        );
    }

    #[test]
    fn thematic_break_and_empty_input() {
        assert_eq!(parse_blocks("---\n"), vec![Block::ThematicBreak]);
        assert!(parse_blocks("").is_empty());
    }
}
