//! HTML rendering, following the CommonMark reference output shape.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::blocks::{Block, ColumnAlignment, Inline, ListItem};

/// Appends the block's HTML. Output ends with `'\n'`.
pub fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph(content) => {
            out.push_str("<p>");
            push_inlines(content, out);
            out.push_str("</p>\n");
        }
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            push_inlines(content, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::BlockQuote(children) => {
            out.push_str("<blockquote>\n");
            for child in children {
                render_block(child, out);
            }
            out.push_str("</blockquote>\n");
        }
        Block::BulletedList { tight, items } => {
            out.push_str("<ul>\n");
            push_items(items, *tight, out);
            out.push_str("</ul>\n");
        }
        Block::NumberedList { tight, start, items } => {
            if *start == 1 {
                out.push_str("<ol>\n");
            } else {
                out.push_str(&format!("<ol start=\"{start}\">\n"));
            }
            push_items(items, *tight, out);
            out.push_str("</ol>\n");
        }
        Block::CodeBlock { info, content } => {
            let language = info
                .as_deref()
                .and_then(|info| info.split_whitespace().next());
            match language {
                Some(language) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    encode_double_quoted_attribute(language)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&encode_text(content));
            out.push_str("</code></pre>\n");
        }
        Block::HtmlBlock(raw) => {
            out.push_str(raw);
            if !raw.ends_with('\n') {
                out.push('\n');
            }
        }
        Block::Table {
            alignments,
            head,
            rows,
        } => {
            out.push_str("<table>\n<thead>\n");
            push_row("th", alignments, head, out);
            out.push_str("</thead>\n");
            if !rows.is_empty() {
                out.push_str("<tbody>\n");
                for row in rows {
                    push_row("td", alignments, row, out);
                }
                out.push_str("</tbody>\n");
            }
            out.push_str("</table>\n");
        }
        Block::ThematicBreak => out.push_str("<hr />\n"),
    }
}

/// Renders a run of inlines as HTML.
pub fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_inlines(inlines, &mut out);
    out
}

fn push_items(items: &[ListItem], tight: bool, out: &mut String) {
    for item in items {
        out.push_str("<li>");
        if let Some(checked) = item.task {
            out.push_str(if checked {
                "<input type=\"checkbox\" disabled=\"\" checked=\"\" /> "
            } else {
                "<input type=\"checkbox\" disabled=\"\" /> "
            });
        }
        if tight {
            // Tight items drop the <p> wrapper around paragraphs.
            let mut body = String::new();
            for child in &item.children {
                match child {
                    Block::Paragraph(content) => push_inlines(content, &mut body),
                    other => {
                        if !body.is_empty() && !body.ends_with('\n') {
                            body.push('\n');
                        }
                        render_block(other, &mut body);
                    }
                }
            }
            out.push_str(&body);
        } else {
            out.push('\n');
            for child in &item.children {
                render_block(child, out);
            }
        }
        out.push_str("</li>\n");
    }
}

fn push_row(tag: &str, alignments: &[ColumnAlignment], cells: &[Vec<Inline>], out: &mut String) {
    out.push_str("<tr>\n");
    for (i, cell) in cells.iter().enumerate() {
        match alignments.get(i).copied().unwrap_or_default() {
            ColumnAlignment::None => out.push_str(&format!("<{tag}>")),
            ColumnAlignment::Left => out.push_str(&format!("<{tag} style=\"text-align: left\">")),
            ColumnAlignment::Center => {
                out.push_str(&format!("<{tag} style=\"text-align: center\">"))
            }
            ColumnAlignment::Right => {
                out.push_str(&format!("<{tag} style=\"text-align: right\">"))
            }
        }
        push_inlines(cell, out);
        out.push_str(&format!("</{tag}>\n"));
    }
    out.push_str("</tr>\n");
}

fn push_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        push_inline(inline, out);
    }
}

fn push_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(&encode_text(text)),
        Inline::SoftBreak => out.push('\n'),
        Inline::LineBreak => out.push_str("<br />\n"),
        Inline::Code(code) => {
            out.push_str("<code>");
            out.push_str(&encode_text(code));
            out.push_str("</code>");
        }
        Inline::Html(raw) => out.push_str(raw),
        Inline::Emphasis(children) => push_tagged("em", children, out),
        Inline::Strong(children) => push_tagged("strong", children, out),
        Inline::Strikethrough(children) => push_tagged("del", children, out),
        Inline::Link {
            destination,
            title,
            children,
        } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(destination));
            out.push('"');
            push_title(title, out);
            out.push('>');
            push_inlines(children, out);
            out.push_str("</a>");
        }
        Inline::Image { source, title, alt } => {
            out.push_str("<img src=\"");
            out.push_str(&encode_double_quoted_attribute(source));
            out.push_str("\" alt=\"");
            let alt = crate::render::plain_text::render_inlines(alt);
            out.push_str(&encode_double_quoted_attribute(&alt));
            out.push('"');
            push_title(title, out);
            out.push_str(" />");
        }
    }
}

fn push_tagged(tag: &str, children: &[Inline], out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    push_inlines(children, out);
    out.push_str(&format!("</{tag}>"));
}

fn push_title(title: &str, out: &mut String) {
    if !title.is_empty() {
        out.push_str(" title=\"");
        out.push_str(&encode_double_quoted_attribute(title));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn html(block: &Block) -> String {
        let mut out = String::new();
        render_block(block, &mut out);
        out
    }

    #[test]
    fn escapes_text() {
        assert_eq!(
            html(&Block::paragraph("a < b & c")),
            "<p>a &lt; b &amp; c</p>\n"
        );
    }

    #[test]
    fn tight_list_unwraps_paragraphs() {
        let list = Block::BulletedList {
            tight: true,
            items: vec![ListItem::new(vec![Block::paragraph("one")])],
        };
        assert_eq!(html(&list), "<ul>\n<li>one</li>\n</ul>\n");
    }

    #[test]
    fn loose_numbered_list_keeps_paragraphs() {
        let list = Block::NumberedList {
            tight: false,
            start: 2,
            items: vec![ListItem::new(vec![Block::paragraph("two")])],
        };
        assert_eq!(
            html(&list),
            "<ol start=\"2\">\n<li>\n<p>two</p>\n</li>\n</ol>\n"
        );
    }

    #[test]
    fn task_item_has_checkbox() {
        let list = Block::BulletedList {
            tight: true,
            items: vec![ListItem::task(true, vec![Block::paragraph("done")])],
        };
        assert_eq!(
            html(&list),
            "<ul>\n<li><input type=\"checkbox\" disabled=\"\" checked=\"\" /> done</li>\n</ul>\n"
        );
    }

    #[test]
    fn code_block_language_class() {
        let code = Block::CodeBlock {
            info: Some("rust ignore".to_string()),
            content: "a<b\n".to_string(),
        };
        assert_eq!(
            html(&code),
            "<pre><code class=\"language-rust\">a&lt;b\n</code></pre>\n"
        );
    }

    #[test]
    fn image_alt_is_plain_text() {
        let image = Inline::Image {
            source: "cat.png".to_string(),
            title: String::new(),
            alt: vec![Inline::Emphasis(vec![Inline::text("a cat")])],
        };
        assert_eq!(
            render_inlines(&[image]),
            "<img src=\"cat.png\" alt=\"a cat\" />"
        );
    }
}
