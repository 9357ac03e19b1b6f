//! # Block Nodes
//!
//! The document tree is an ordered list of [`Block`]s. Containers (block quotes,
//! and lists through their items) own nested blocks; leaf blocks own inline
//! content.
//!
//! ## Modules
//!
//! - **`types`**: Block-level types (`Block`, `ListItem`, `ColumnAlignment`)
//! - **`inline`**: Inline-level types (`Inline`)
//!
//! ## Key Invariants
//!
//! - Order of blocks is document reading order
//! - `children()` exposes exactly one level of nesting
//! - Every block can render itself in every `RenderFormat`

pub mod inline;
pub mod types;

pub use inline::Inline;
pub use types::{Block, ColumnAlignment, ListItem};
