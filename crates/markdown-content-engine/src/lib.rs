pub mod blocks;
pub mod builder;
pub mod content;
pub mod io;
pub mod parsing;
pub mod render;
pub mod search;

// Re-export key types for easier usage
pub use blocks::{Block, ColumnAlignment, Inline, ListItem};
pub use builder::ContentBuilder;
pub use content::{BlockSequence, Content};
pub use io::{IoError, read_content};
pub use render::RenderFormat;
pub use search::{
    CompareOptions, DEFAULT_CONTEXT_LENGTH, Locale, SearchOptions, SearchResult, snippet,
};
