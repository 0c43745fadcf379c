//! # Editor Surface
//!
//! Owns the hierarchy document and the positioned snapshot derived from it.
//!
//! ```text
//!   inject / apply / undo / redo / set_direction
//!                  │
//!                  ▼
//!        candidate document ── flatten ── layout ──▶ candidate snapshot
//!                  │                                        │
//!                  └──────── commit both on success ────────┘
//! ```
//!
//! Recompute runs on copies. If any stage fails the surface keeps the
//! previous document, history and snapshot.

use pagemap_model::HierarchyDocument;
use tracing::{info, instrument, warn};

use crate::errors::EditorError;
use crate::flatten::{flatten, section_items, FlatGraph};
use crate::layout::{layout, LayoutDirection};
use crate::mutations::Mutation;
use crate::render::{EdgeChange, NodeChange};
use crate::reorder::{reorder, SectionDrop};
use crate::undo_stack::UndoStack;

/// Flatten and position `doc`.
pub fn render_document(doc: &HierarchyDocument, direction: LayoutDirection) -> Result<FlatGraph, EditorError> {
    let flat = flatten(&doc.pages, &doc.home_sections)?;
    Ok(layout(&flat, direction)?)
}

#[derive(Debug, Clone)]
pub struct EditorSurface {
    document: HierarchyDocument,
    direction: LayoutDirection,
    rendered: FlatGraph,
    history: UndoStack,
    /// Bumped on every committed document change
    version: u64,
}

impl EditorSurface {
    /// Surface showing the built-in default structure top to bottom.
    pub fn new() -> Result<Self, EditorError> {
        Self::with_document(HierarchyDocument::default_structure(), LayoutDirection::default())
    }

    pub fn with_document(document: HierarchyDocument, direction: LayoutDirection) -> Result<Self, EditorError> {
        document.validate()?;
        let rendered = render_document(&document, direction)?;
        Ok(Self {
            document,
            direction,
            rendered,
            history: UndoStack::new(),
            version: 0,
        })
    }

    pub fn document(&self) -> &HierarchyDocument {
        &self.document
    }

    /// The positioned snapshot last handed to the renderer
    pub fn rendered(&self) -> &FlatGraph {
        &self.rendered
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the whole document, e.g. after loading. History is cleared.
    #[instrument(skip(self, document), fields(pages = document.page_count()))]
    pub fn inject(&mut self, document: HierarchyDocument) -> Result<(), EditorError> {
        document.validate()?;
        let rendered = render_document(&document, self.direction)?;

        self.history.clear();
        self.commit(document, rendered);
        info!(version = self.version, "Injected document");
        Ok(())
    }

    /// Apply a mutation, recording it for undo. Returns the new version.
    #[instrument(skip(self, mutation), fields(mutation = mutation.name()))]
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, EditorError> {
        let mut history = self.history.clone();
        let mut candidate = self.document.clone();

        if let Err(e) = history.apply(&mutation, &mut candidate) {
            warn!(error = %e, "Rejected mutation");
            return Err(e.into());
        }
        let rendered = render_document(&candidate, self.direction)?;

        self.history = history;
        self.commit(candidate, rendered);
        Ok(self.version)
    }

    /// Undo the last mutation. Returns false when history is empty.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.step(|history, doc| history.undo(doc))
    }

    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.step(|history, doc| history.redo(doc))
    }

    fn step<F>(&mut self, f: F) -> Result<bool, EditorError>
    where
        F: FnOnce(&mut UndoStack, &mut HierarchyDocument) -> Result<bool, crate::mutations::MutationError>,
    {
        let mut history = self.history.clone();
        let mut candidate = self.document.clone();

        if !f(&mut history, &mut candidate)? {
            return Ok(false);
        }
        let rendered = render_document(&candidate, self.direction)?;

        self.history = history;
        self.commit(candidate, rendered);
        Ok(true)
    }

    /// Handle a section drop from the drag engine. Returns true when the
    /// section order changed.
    pub fn drop_section(&mut self, drop: &SectionDrop) -> Result<bool, EditorError> {
        let sections = section_items(&self.document.home_sections);
        let Some((from, to)) = drop.resolve(&sections)? else {
            return Ok(false);
        };

        self.apply(Mutation::MoveSection { from, to })?;
        Ok(true)
    }

    /// Move the section named `dragged` into `target`'s slot.
    pub fn reorder_sections(&mut self, dragged: &str, target: &str) -> Result<bool, EditorError> {
        if dragged == target {
            return Ok(false);
        }

        let sections = reorder(&self.document.home_sections, dragged, target)?;
        self.apply(Mutation::SetHomeSections { sections })?;
        Ok(true)
    }

    /// Patch the snapshot with renderer node events. The document is untouched.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        self.rendered.apply_node_changes(changes);
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        self.rendered.apply_edge_changes(changes);
    }

    /// Re-run layout in a new direction.
    #[instrument(skip(self))]
    pub fn set_direction(&mut self, direction: LayoutDirection) -> Result<(), EditorError> {
        self.rendered = render_document(&self.document, direction)?;
        self.direction = direction;
        Ok(())
    }

    /// Recompute the snapshot from the document, discarding view-only edits.
    pub fn relayout(&mut self) -> Result<(), EditorError> {
        self.set_direction(self.direction)
    }

    fn commit(&mut self, document: HierarchyDocument, rendered: FlatGraph) {
        self.document = document;
        self.rendered = rendered;
        self.version += 1;
    }
}
