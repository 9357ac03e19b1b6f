//! # Search
//!
//! Exact-offset full-text search over each block's plain-text rendering.
//!
//! ## Modules
//!
//! - **`engine`**: the block scan producing ordered, non-overlapping matches
//! - **`options`**: comparison flags, locale and snippet context length
//! - **`result`**: `SearchResult` and its derived accessors
//! - **`snippet`**: ellipsis-marked context windows
//! - **`text`**: grapheme-cluster offset conversion
//!
//! ## Key Invariants
//!
//! - Offsets are grapheme clusters, never bytes
//! - Results are ordered by block index, then match start
//! - `0 <= start < end <= grapheme_len(block_text)` for every produced result

pub mod engine;
pub mod options;
pub mod result;
pub mod snippet;
pub mod text;

pub use engine::{block_plain_text, search};
pub use options::{CompareOptions, Locale, SearchOptions};
pub use result::SearchResult;
pub use snippet::{DEFAULT_CONTEXT_LENGTH, ELLIPSIS, snippet};
pub use text::{GraphemeText, grapheme_len};
