//! # Pagemap Model
//!
//! The page hierarchy: a tree of [`PageNode`]s plus the home page's section
//! order, bundled as a [`HierarchyDocument`]. This crate owns the JSON wire
//! format and the structural invariants (unique ids, levels ≥ 1, bounded depth,
//! finite pins).

pub mod document;
pub mod error;
pub mod page;
pub mod serializer;

pub use document::{HierarchyDocument, DEFAULT_HOME_SECTIONS, HOME_PAGE_ID, MAX_DEPTH};
pub use error::{ParseError, ParseResult};
pub use page::{PageNode, Position};
pub use serializer::{parse, serialize, serialize_pretty};
