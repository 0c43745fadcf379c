//! # Pagemap Editor
//!
//! Editing engine for site hierarchy diagrams.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: JSON ⇄ HierarchyDocument             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: surface + mutations + history       │
//! │  - Flatten the tree into nodes and edges    │
//! │  - Position them with the layered layout    │
//! │  - Reorder home sections from drag events   │
//! │  - Save / load / export through the host    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: positioned FlatGraph (external)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The document is the source of truth. The rendered snapshot is derived
//! from it and rebuilt after every committed change.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagemap_editor::{EditorSurface, FileStore, DirectoryExporter, HostShell, Mutation};
//!
//! let mut surface = EditorSurface::new()?;
//! let mut host = HostShell::new(FileStore::new(".pagemap"), DirectoryExporter::new("."));
//! host.load(&mut surface)?;
//!
//! surface.apply(Mutation::RenamePage {
//!     page_id: "about".to_string(),
//!     label: "About us".to_string(),
//! })?;
//!
//! host.save(&surface)?;
//! ```

mod errors;
mod flatten;
mod host;
mod layout;
mod mutations;
mod render;
mod reorder;
mod storage;
mod surface;
mod undo_stack;

pub use errors::{EditorError, FlattenError, ReorderError};
pub use flatten::{
    flatten, EdgeKind, FlatEdge, FlatGraph, FlatNode, NodeKind, PageData, SectionItem, SectionKey, Side,
};
pub use host::{HostShell, EXPORT_FILE_NAME, STORAGE_KEY};
pub use layout::{layout, LayoutDirection, NODE_HEIGHT, NODE_WIDTH};
pub use mutations::{Mutation, MutationError};
pub use render::{EdgeChange, NodeChange};
pub use reorder::{move_item, reorder, SectionDrop};
pub use storage::{
    DirectoryExporter, FileExporter, FileStore, KeyValueStore, MemoryExporter, MemoryStore, StorageError,
};
pub use surface::{render_document, EditorSurface};
pub use undo_stack::{HistoryEntry, UndoStack};

// Re-export model types for convenience
pub use pagemap_model::{
    parse, serialize, serialize_pretty, HierarchyDocument, PageNode, ParseError, Position, DEFAULT_HOME_SECTIONS,
    HOME_PAGE_ID,
};
