/// An inline node inside a leaf block.
///
/// Text-bearing variants own their (already unescaped) text. Renderers are
/// responsible for escaping when producing markup or HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text.
    Text(String),
    /// A line ending inside a paragraph that is not a hard break.
    SoftBreak,
    /// A hard line break (two trailing spaces or a backslash).
    LineBreak,
    /// A code span. Raw zone: no nested inlines.
    Code(String),
    /// Raw inline HTML.
    Html(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        destination: String,
        /// Empty when the link has no title.
        title: String,
        children: Vec<Inline>,
    },
    Image {
        source: String,
        /// Empty when the image has no title.
        title: String,
        alt: Vec<Inline>,
    },
}

impl Inline {
    /// Convenience constructor for a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }
}
