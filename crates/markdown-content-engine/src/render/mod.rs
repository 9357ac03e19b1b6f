//! # Rendering
//!
//! Every block renders itself in three projections:
//!
//! - **`markup`**: Markdown source that parses back to an equivalent tree
//! - **`plain_text`**: format-stripped, human-readable text (what search scans)
//! - **`html`**: presentational markup
//!
//! Per-block output is self-terminated (markup ends with a blank line, plain
//! text and HTML with a newline), so a document renders by plain
//! concatenation. Document-level trimming lives in `Content::render`.

pub mod html;
pub mod markup;
pub mod plain_text;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::blocks::Block;
use std::str::FromStr;

/// The projection a block or document is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderFormat {
    /// Markdown source.
    #[default]
    Markup,
    PlainText,
    /// Presentational markup (HTML).
    Html,
}

impl RenderFormat {
    /// Whether document-level rendering strips one trailing line terminator.
    #[must_use]
    pub fn strips_trailing_newline(self) -> bool {
        matches!(self, RenderFormat::Markup | RenderFormat::PlainText)
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderFormat::Markup => "markup",
            RenderFormat::PlainText => "plain-text",
            RenderFormat::Html => "html",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown render format: {0}")]
pub struct UnknownRenderFormat(pub String);

impl FromStr for RenderFormat {
    type Err = UnknownRenderFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markup" | "markdown" | "md" => Ok(RenderFormat::Markup),
            "plain-text" | "plain" | "text" | "txt" => Ok(RenderFormat::PlainText),
            "html" => Ok(RenderFormat::Html),
            _ => Err(UnknownRenderFormat(s.to_string())),
        }
    }
}

/// Renders a run of sibling blocks in `format` by concatenation.
pub(crate) fn render_blocks(blocks: &[Block], format: RenderFormat, out: &mut String) {
    match format {
        RenderFormat::Markup => markup::render_blocks(blocks, out),
        RenderFormat::PlainText | RenderFormat::Html => {
            for block in blocks {
                block.render_into(format, out);
            }
        }
    }
}

/// Removes exactly one trailing `"\n"` or `"\r\n"`, if present.
pub fn strip_trailing_line_terminator(text: &mut String) {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
}

/// Prefixes every line of `text` with `first` on the first line and `rest`
/// on the following ones. Empty lines get the prefix with trailing spaces
/// trimmed.
pub(crate) fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let prefix = if i == 0 { first } else { rest };
        if line.is_empty() {
            out.push_str(prefix.trim_end());
        } else {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    out
}
