//! # Undo/Redo Stack
//!
//! Tracks mutation history for the editor surface.
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverse and moves the entry to the redo stack
//! - Redo reapplies the original mutation
//! - New mutations clear the redo stack
//!
//! The stack is a plain value; the surface clones it alongside the document
//! so a failed recompute can discard both together.

use pagemap_model::HierarchyDocument;

use crate::mutations::{Mutation, MutationError};

/// One undoable step
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub mutation: Mutation,
    pub inverse: Mutation,
}

#[derive(Debug, Clone)]
pub struct UndoStack {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut HierarchyDocument) -> Result<(), MutationError> {
        let inverse = mutation.to_inverse(doc)?;
        mutation.apply(doc)?;

        self.undo_stack.push(HistoryEntry {
            mutation: mutation.clone(),
            inverse,
        });
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();

        Ok(())
    }

    /// Undo the most recent mutation. Returns false when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut HierarchyDocument) -> Result<bool, MutationError> {
        let Some(entry) = self.undo_stack.pop() else {
            return Ok(false);
        };

        entry.inverse.apply(doc)?;
        self.redo_stack.push(entry);
        Ok(true)
    }

    /// Redo the most recently undone mutation
    pub fn redo(&mut self, doc: &mut HierarchyDocument) -> Result<bool, MutationError> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(false);
        };

        entry.mutation.apply(doc)?;
        self.undo_stack.push(entry);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the mutation the next undo would revert
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|e| e.mutation.name())
    }

    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|e| e.mutation.name())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
