//! Markdown source rendering.

use super::prefix_lines;
use crate::blocks::{Block, ColumnAlignment, Inline, ListItem};

/// Characters that would otherwise be read as Markdown syntax inside text.
const ESCAPED: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '~', '&'];

/// Characters that only open a block construct at the start of a line.
const LINE_START_ESCAPED: &[char] = &['#', '-', '+', '=', '>'];

/// Appends the block's Markdown followed by a blank line.
pub fn render_block(block: &Block, out: &mut String) {
    out.push_str(&block_body(block, false));
    out.push_str("\n\n");
}

/// Appends a run of sibling blocks, each followed by a blank line.
///
/// Adjacent lists of the same kind alternate their markers so they stay
/// separate lists when the output is parsed again.
pub fn render_blocks(blocks: &[Block], out: &mut String) {
    for body in bodies(blocks) {
        out.push_str(&body);
        out.push_str("\n\n");
    }
}

/// Renders a run of inlines as Markdown.
pub fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_inline(inline, &mut out);
    }
    out
}

/// The block's Markdown without any trailing line terminator. Lists use
/// their alternate marker (`*` or `)`) when `alternate` is set.
fn block_body(block: &Block, alternate: bool) -> String {
    match block {
        Block::Paragraph(content) => render_inlines(content),
        Block::Heading { level, content } => {
            format!("{} {}", "#".repeat(usize::from(*level)), render_inlines(content))
        }
        Block::BlockQuote(children) => prefix_lines(&join_bodies(children, "\n\n"), "> ", "> "),
        Block::BulletedList { tight, items } => {
            let bullet = if alternate { "* " } else { "- " };
            list_body(items, *tight, |_| bullet.to_string())
        }
        Block::NumberedList { tight, start, items } => {
            let delimiter = if alternate { ')' } else { '.' };
            list_body(items, *tight, |i| {
                format!("{}{delimiter} ", start.saturating_add(i as u64))
            })
        }
        Block::CodeBlock { info, content } => code_block_body(info.as_deref(), content),
        Block::HtmlBlock(raw) => raw.trim_end_matches('\n').to_string(),
        Block::Table {
            alignments,
            head,
            rows,
        } => table_body(alignments, head, rows),
        Block::ThematicBreak => "---".to_string(),
    }
}

fn bodies(blocks: &[Block]) -> Vec<String> {
    let mut alternate = false;
    let mut previous: Option<&Block> = None;
    blocks
        .iter()
        .map(|block| {
            alternate = !alternate && previous.is_some_and(|p| same_list_kind(p, block));
            previous = Some(block);
            block_body(block, alternate)
        })
        .collect()
}

fn same_list_kind(a: &Block, b: &Block) -> bool {
    matches!(
        (a, b),
        (Block::BulletedList { .. }, Block::BulletedList { .. })
            | (Block::NumberedList { .. }, Block::NumberedList { .. })
    )
}

fn join_bodies(blocks: &[Block], separator: &str) -> String {
    bodies(blocks).join(separator)
}

fn list_body(items: &[ListItem], tight: bool, marker: impl Fn(usize) -> String) -> String {
    let separator = if tight { "\n" } else { "\n\n" };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = marker(i);
            let indent = " ".repeat(marker.len());
            let first = match item.task {
                Some(true) => format!("{marker}[x] "),
                Some(false) => format!("{marker}[ ] "),
                None => marker,
            };
            let body = join_bodies(&item.children, separator);
            if body.is_empty() {
                first.trim_end().to_string()
            } else {
                prefix_lines(&body, &first, &indent)
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn code_block_body(info: Option<&str>, content: &str) -> String {
    let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
    let mut out = String::with_capacity(content.len() + 2 * fence.len() + 4);
    out.push_str(&fence);
    if let Some(info) = info {
        out.push_str(info);
    }
    out.push('\n');
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out
}

fn table_body(
    alignments: &[ColumnAlignment],
    head: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
) -> String {
    let row_line = |cells: &[Vec<Inline>]| {
        let cells: Vec<String> = cells
            .iter()
            .map(|cell| render_inlines(cell).replace('|', "\\|"))
            .collect();
        format!("| {} |", cells.join(" | "))
    };
    let delimiters: Vec<&str> = alignments
        .iter()
        .map(|alignment| match alignment {
            ColumnAlignment::None => "---",
            ColumnAlignment::Left => ":--",
            ColumnAlignment::Center => ":-:",
            ColumnAlignment::Right => "--:",
        })
        .collect();

    let mut lines = vec![row_line(head), format!("| {} |", delimiters.join(" | "))];
    lines.extend(rows.iter().map(|row| row_line(row)));
    lines.join("\n")
}

fn push_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => push_escaped(text, out),
        Inline::SoftBreak => out.push('\n'),
        Inline::LineBreak => out.push_str("\\\n"),
        Inline::Code(code) => push_code_span(code, out),
        Inline::Html(raw) => out.push_str(raw),
        Inline::Emphasis(children) => push_wrapped("*", children, out),
        Inline::Strong(children) => push_wrapped("**", children, out),
        Inline::Strikethrough(children) => push_wrapped("~~", children, out),
        Inline::Link {
            destination,
            title,
            children,
        } => {
            out.push('[');
            out.push_str(&render_inlines(children));
            out.push(']');
            push_destination(destination, title, out);
        }
        Inline::Image { source, title, alt } => {
            out.push_str("![");
            out.push_str(&render_inlines(alt));
            out.push(']');
            push_destination(source, title, out);
        }
    }
}

fn push_wrapped(delimiter: &str, children: &[Inline], out: &mut String) {
    out.push_str(delimiter);
    out.push_str(&render_inlines(children));
    out.push_str(delimiter);
}

fn push_escaped(text: &str, out: &mut String) {
    let mut line_start = out.is_empty() || out.ends_with('\n');
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if line_start {
            // "1." and "1)" open an ordered list.
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if (1..=9).contains(&digits) && rest[digits..].starts_with(['.', ')']) {
                out.push_str(&rest[..digits]);
                out.push('\\');
                rest = &rest[digits..];
                line_start = false;
                continue;
            }
        }
        if ESCAPED.contains(&c) || (line_start && LINE_START_ESCAPED.contains(&c)) {
            out.push('\\');
        }
        out.push(c);
        line_start = c == '\n';
        rest = &rest[c.len_utf8()..];
    }
}

fn push_code_span(code: &str, out: &mut String) {
    let delimiter = "`".repeat(longest_backtick_run(code) + 1);
    let pad = code.starts_with('`')
        || code.ends_with('`')
        || (code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty());
    out.push_str(&delimiter);
    if pad {
        out.push(' ');
    }
    out.push_str(code);
    if pad {
        out.push(' ');
    }
    out.push_str(&delimiter);
}

fn push_destination(destination: &str, title: &str, out: &mut String) {
    out.push('(');
    if destination.contains([' ', '(', ')']) {
        out.push('<');
        out.push_str(destination);
        out.push('>');
    } else {
        out.push_str(destination);
    }
    if !title.is_empty() {
        out.push_str(" \"");
        out.push_str(&title.replace('"', "\\\""));
        out.push('"');
    }
    out.push(')');
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraph_ends_with_blank_line() {
        let mut out = String::new();
        render_block(&Block::paragraph("Hello"), &mut out);
        assert_eq!(out, "Hello\n\n");
    }

    #[test]
    fn escapes_markdown_punctuation() {
        assert_eq!(
            render_inlines(&[Inline::text("a*b_[c]")]),
            "a\\*b\\_\\[c\\]"
        );
    }

    #[test]
    fn quote_prefixes_nested_blocks() {
        let quote = Block::BlockQuote(vec![Block::paragraph("one"), Block::paragraph("two")]);
        assert_eq!(block_body(&quote, false), "> one\n>\n> two");
    }

    #[test]
    fn numbered_task_list() {
        let list = Block::NumberedList {
            tight: true,
            start: 3,
            items: vec![
                ListItem::task(true, vec![Block::paragraph("done")]),
                ListItem::task(false, vec![Block::paragraph("todo")]),
            ],
        };
        assert_eq!(block_body(&list, false), "3. [x] done\n4. [ ] todo");
    }

    #[test]
    fn nested_list_is_indented_under_marker() {
        let list = Block::BulletedList {
            tight: true,
            items: vec![ListItem::new(vec![
                Block::paragraph("outer"),
                Block::BulletedList {
                    tight: true,
                    items: vec![ListItem::new(vec![Block::paragraph("inner")])],
                },
            ])],
        };
        assert_eq!(block_body(&list, false), "- outer\n  - inner");
    }

    #[test]
    fn code_fence_outgrows_inner_fences() {
        let code = Block::CodeBlock {
            info: Some("md".to_string()),
            content: "```\nx\n```\n".to_string(),
        };
        assert_eq!(block_body(&code, false), "````md\n```\nx\n```\n````");
    }

    #[test]
    fn code_span_with_backticks_is_padded() {
        assert_eq!(render_inlines(&[Inline::Code("a`b".to_string())]), "``a`b``");
        assert_eq!(render_inlines(&[Inline::Code("`x".to_string())]), "`` `x ``");
    }

    #[test]
    fn link_with_title() {
        let link = Inline::Link {
            destination: "https://example.com".to_string(),
            title: "Ex".to_string(),
            children: vec![Inline::text("site")],
        };
        assert_eq!(render_inlines(&[link]), "[site](https://example.com \"Ex\")");
    }

    #[test]
    fn table_rows_and_alignment() {
        let table = Block::Table {
            alignments: vec![ColumnAlignment::Left, ColumnAlignment::Right],
            head: vec![vec![Inline::text("a")], vec![Inline::text("b")]],
            rows: vec![vec![vec![Inline::text("1")], vec![Inline::text("x|y")]]],
        };
        assert_eq!(
            block_body(&table, false),
            "| a | b |\n| :-- | --: |\n| 1 | x\\|y |"
        );
    }

    #[test]
    fn escapes_block_openers_at_line_start() {
        assert_eq!(render_inlines(&[Inline::text("# no")]), "\\# no");
        assert_eq!(render_inlines(&[Inline::text("12. no")]), "12\\. no");
        assert_eq!(render_inlines(&[Inline::text("3) no")]), "3\\) no");
        assert_eq!(
            render_inlines(&[Inline::text("a"), Inline::SoftBreak, Inline::text("- b + c")]),
            "a\n\\- b + c"
        );
        assert_eq!(render_inlines(&[Inline::text("2024 was a # year")]), "2024 was a # year");
    }

    #[test]
    fn escapes_entities() {
        assert_eq!(render_inlines(&[Inline::text("a &amp; b")]), "a \\&amp; b");
    }

    #[test]
    fn adjacent_lists_alternate_markers() {
        let bullets = |text: &str| Block::BulletedList {
            tight: true,
            items: vec![ListItem::new(vec![Block::paragraph(text)])],
        };
        let numbers = |text: &str| Block::NumberedList {
            tight: true,
            start: 1,
            items: vec![ListItem::new(vec![Block::paragraph(text)])],
        };
        let mut out = String::new();
        render_blocks(
            &[bullets("a"), bullets("b"), bullets("c"), numbers("d"), numbers("e")],
            &mut out,
        );
        assert_eq!(out, "- a\n\n* b\n\n- c\n\n1. d\n\n1) e\n\n");
    }
}
