//! Plain-text rendering: formatting stripped, one line per paragraph.

use crate::blocks::{Block, Inline};

/// Appends the block's plain text. Non-empty output ends with `'\n'`.
pub fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph(content) | Block::Heading { content, .. } => {
            push_line(&render_inlines(content), out);
        }
        Block::BlockQuote(children) => {
            for child in children {
                render_block(child, out);
            }
        }
        Block::BulletedList { items, .. } | Block::NumberedList { items, .. } => {
            for child in items.iter().flat_map(|item| &item.children) {
                render_block(child, out);
            }
        }
        Block::CodeBlock { content, .. } => {
            push_line(content.trim_end_matches(['\n', '\r']), out);
        }
        Block::Table { head, rows, .. } => {
            for row in std::iter::once(head).chain(rows) {
                let cells: Vec<String> = row.iter().map(|cell| render_inlines(cell)).collect();
                push_line(&cells.join("\t"), out);
            }
        }
        Block::HtmlBlock(_) | Block::ThematicBreak => {}
    }
}

/// Renders a run of inlines as plain text.
pub fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_inline(inline, &mut out);
    }
    out
}

fn push_line(text: &str, out: &mut String) {
    if text.is_empty() {
        return;
    }
    out.push_str(text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
}

fn push_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) | Inline::Code(text) => out.push_str(text),
        Inline::SoftBreak => out.push(' '),
        Inline::LineBreak => out.push('\n'),
        Inline::Html(_) => {}
        Inline::Emphasis(children)
        | Inline::Strong(children)
        | Inline::Strikethrough(children)
        | Inline::Link { children, .. }
        | Inline::Image { alt: children, .. } => {
            for child in children {
                push_inline(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ListItem;

    #[test]
    fn strips_inline_formatting() {
        let inlines = vec![
            Inline::text("a "),
            Inline::Strong(vec![Inline::text("bold")]),
            Inline::SoftBreak,
            Inline::Link {
                destination: "x".to_string(),
                title: String::new(),
                children: vec![Inline::Code("code".to_string())],
            },
        ];
        assert_eq!(render_inlines(&inlines), "a bold code");
    }

    #[test]
    fn list_renders_item_text_without_markers() {
        let list = Block::BulletedList {
            tight: true,
            items: vec![
                ListItem::new(vec![Block::paragraph("one")]),
                ListItem::new(vec![Block::paragraph("two")]),
            ],
        };
        let mut out = String::new();
        render_block(&list, &mut out);
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn breaks_and_html_render_nothing() {
        let mut out = String::new();
        render_block(&Block::ThematicBreak, &mut out);
        render_block(&Block::HtmlBlock("<div></div>\n".to_string()), &mut out);
        assert_eq!(out, "");
    }

    #[test]
    fn code_block_keeps_single_terminator() {
        let mut out = String::new();
        render_block(
            &Block::CodeBlock {
                info: None,
                content: "let x = 1;\n".to_string(),
            },
            &mut out,
        );
        assert_eq!(out, "let x = 1;\n");
    }
}
