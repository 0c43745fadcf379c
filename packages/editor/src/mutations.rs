//! # Hierarchy Mutations
//!
//! Semantic edits to a [`HierarchyDocument`].
//!
//! Every mutation validates against the document before touching it, so a
//! failed mutation leaves the document exactly as it was. Each one can also
//! produce its inverse (computed against the pre-edit document) for undo.
//!
//! ### MovePage
//! - Relocates a whole subtree under a new parent at `index`
//! - Fails if the new parent sits inside the moved subtree
//! - The root page never moves
//!
//! AddPage and MovePage also refuse to nest a page deeper than
//! [`MAX_DEPTH`], and pins must be finite, so every committed document stays
//! loadable.
//!
//! ### MoveSection
//! - Array-move within the home section list: remove at `from`, insert at `to`

use std::collections::HashSet;

use pagemap_model::{HierarchyDocument, PageNode, Position, MAX_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a page (with any children it carries) under a parent
    AddPage {
        parent_id: String,
        index: usize,
        page: PageNode,
    },

    /// Remove a page and its whole subtree
    RemovePage { page_id: String },

    RenamePage { page_id: String, label: String },

    SetLevel { page_id: String, level: u32 },

    MovePage {
        page_id: String,
        new_parent_id: String,
        index: usize,
    },

    MoveSection { from: usize, to: usize },

    /// Replace the home section list wholesale
    SetHomeSections { sections: Vec<String> },

    /// Persist a top-left coordinate that overrides auto-layout
    PinPage { page_id: String, position: Position },

    UnpinPage { page_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Page id already in use: {0}")]
    DuplicateId(String),

    #[error("Moving {0} there would make it its own ancestor")]
    CycleDetected(String),

    #[error("The root page cannot be removed")]
    CannotRemoveRoot,

    #[error("The root page cannot be moved")]
    CannotMoveRoot,

    #[error("Section index {index} out of range for {len} sections")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Page {0} has level 0 (levels start at 1)")]
    InvalidLevel(String),

    #[error("Page {0} would sit deeper than {max} levels", max = MAX_DEPTH)]
    TooDeep(String),

    #[error("Page {0} cannot be pinned at a non-finite position")]
    InvalidPosition(String),
}

impl Mutation {
    /// Short name used in logs and undo labels
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddPage { .. } => "add page",
            Mutation::RemovePage { .. } => "remove page",
            Mutation::RenamePage { .. } => "rename page",
            Mutation::SetLevel { .. } => "set level",
            Mutation::MovePage { .. } => "move page",
            Mutation::MoveSection { .. } => "move section",
            Mutation::SetHomeSections { .. } => "set home sections",
            Mutation::PinPage { .. } => "pin page",
            Mutation::UnpinPage { .. } => "unpin page",
        }
    }

    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut HierarchyDocument) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::AddPage { parent_id, index, page } => {
                let parent = page_mut(doc, parent_id, MutationError::ParentNotFound)?;
                let at = (*index).min(parent.children.len());
                parent.children.insert(at, page.clone());
            }

            Mutation::RemovePage { page_id } => {
                doc.pages
                    .remove_descendant(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
            }

            Mutation::RenamePage { page_id, label } => {
                page_mut(doc, page_id, MutationError::PageNotFound)?.label = label.clone();
            }

            Mutation::SetLevel { page_id, level } => {
                page_mut(doc, page_id, MutationError::PageNotFound)?.level = *level;
            }

            Mutation::MovePage { page_id, new_parent_id, index } => {
                let (moved, _, _) = doc
                    .pages
                    .remove_descendant(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                let parent = page_mut(doc, new_parent_id, MutationError::ParentNotFound)?;
                let at = (*index).min(parent.children.len());
                parent.children.insert(at, moved);
            }

            Mutation::MoveSection { from, to } => {
                let section = doc.home_sections.remove(*from);
                doc.home_sections.insert(*to, section);
            }

            Mutation::SetHomeSections { sections } => {
                doc.home_sections = sections.clone();
            }

            Mutation::PinPage { page_id, position } => {
                page_mut(doc, page_id, MutationError::PageNotFound)?.position = Some(*position);
            }

            Mutation::UnpinPage { page_id } => {
                page_mut(doc, page_id, MutationError::PageNotFound)?.position = None;
            }
        }

        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, doc: &HierarchyDocument) -> Result<(), MutationError> {
        match self {
            Mutation::AddPage { parent_id, page, .. } => {
                if !doc.pages.contains(parent_id) {
                    return Err(MutationError::ParentNotFound(parent_id.clone()));
                }

                let mut incoming = HashSet::new();
                let mut problem = None;
                page.walk(&mut |p, _| {
                    if problem.is_some() {
                        return;
                    }
                    if doc.pages.contains(&p.id) || !incoming.insert(p.id.as_str()) {
                        problem = Some(MutationError::DuplicateId(p.id.clone()));
                    } else if p.level == 0 {
                        problem = Some(MutationError::InvalidLevel(p.id.clone()));
                    } else if p.position.is_some_and(|pos| !pos.is_finite()) {
                        problem = Some(MutationError::InvalidPosition(p.id.clone()));
                    }
                });
                if let Some(problem) = problem {
                    return Err(problem);
                }

                require_depth(doc, parent_id, page)
            }

            Mutation::RemovePage { page_id } => {
                if *page_id == doc.pages.id {
                    return Err(MutationError::CannotRemoveRoot);
                }
                require_page(doc, page_id)
            }

            Mutation::RenamePage { page_id, .. } | Mutation::UnpinPage { page_id } => require_page(doc, page_id),

            Mutation::PinPage { page_id, position } => {
                require_page(doc, page_id)?;
                if !position.is_finite() {
                    return Err(MutationError::InvalidPosition(page_id.clone()));
                }
                Ok(())
            }

            Mutation::SetLevel { page_id, level } => {
                require_page(doc, page_id)?;
                if *level == 0 {
                    return Err(MutationError::InvalidLevel(page_id.clone()));
                }
                Ok(())
            }

            Mutation::MovePage { page_id, new_parent_id, .. } => {
                if *page_id == doc.pages.id {
                    return Err(MutationError::CannotMoveRoot);
                }
                let page = doc
                    .find(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                if !doc.pages.contains(new_parent_id) {
                    return Err(MutationError::ParentNotFound(new_parent_id.clone()));
                }
                if page.is_ancestor_of(new_parent_id) {
                    return Err(MutationError::CycleDetected(page_id.clone()));
                }
                require_depth(doc, new_parent_id, page)
            }

            Mutation::MoveSection { from, to } => {
                let len = doc.home_sections.len();
                for index in [*from, *to] {
                    if index >= len {
                        return Err(MutationError::SectionOutOfRange { index, len });
                    }
                }
                Ok(())
            }

            Mutation::SetHomeSections { .. } => Ok(()),
        }
    }

    /// Build the mutation that undoes `self`, given the document before it
    /// is applied.
    pub fn to_inverse(&self, doc: &HierarchyDocument) -> Result<Mutation, MutationError> {
        self.validate(doc)?;

        let inverse = match self {
            Mutation::AddPage { page, .. } => Mutation::RemovePage {
                page_id: page.id.clone(),
            },

            Mutation::RemovePage { page_id } => {
                let (parent, index) = parent_of(doc, page_id)?;
                Mutation::AddPage {
                    parent_id: parent,
                    index,
                    page: page_ref(doc, page_id)?.clone(),
                }
            }

            Mutation::RenamePage { page_id, .. } => Mutation::RenamePage {
                page_id: page_id.clone(),
                label: page_ref(doc, page_id)?.label.clone(),
            },

            Mutation::SetLevel { page_id, .. } => Mutation::SetLevel {
                page_id: page_id.clone(),
                level: page_ref(doc, page_id)?.level,
            },

            Mutation::MovePage { page_id, .. } => {
                let (parent, index) = parent_of(doc, page_id)?;
                Mutation::MovePage {
                    page_id: page_id.clone(),
                    new_parent_id: parent,
                    index,
                }
            }

            Mutation::MoveSection { from, to } => Mutation::MoveSection { from: *to, to: *from },

            Mutation::SetHomeSections { .. } => Mutation::SetHomeSections {
                sections: doc.home_sections.clone(),
            },

            Mutation::PinPage { page_id, .. } | Mutation::UnpinPage { page_id } => {
                match page_ref(doc, page_id)?.position {
                    Some(position) => Mutation::PinPage {
                        page_id: page_id.clone(),
                        position,
                    },
                    None => Mutation::UnpinPage {
                        page_id: page_id.clone(),
                    },
                }
            }
        };

        Ok(inverse)
    }
}

fn require_page(doc: &HierarchyDocument, id: &str) -> Result<(), MutationError> {
    page_ref(doc, id).map(|_| ())
}

/// `page` hung under `parent_id` must not push the tree past [`MAX_DEPTH`].
fn require_depth(doc: &HierarchyDocument, parent_id: &str, page: &PageNode) -> Result<(), MutationError> {
    let parent_depth = doc
        .pages
        .depth_of(parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;
    if parent_depth + page.height() > MAX_DEPTH {
        return Err(MutationError::TooDeep(page.id.clone()));
    }
    Ok(())
}

fn page_ref<'a>(doc: &'a HierarchyDocument, id: &str) -> Result<&'a PageNode, MutationError> {
    doc.find(id)
        .ok_or_else(|| MutationError::PageNotFound(id.to_string()))
}

fn page_mut<'a>(
    doc: &'a mut HierarchyDocument,
    id: &str,
    missing: fn(String) -> MutationError,
) -> Result<&'a mut PageNode, MutationError> {
    doc.find_mut(id).ok_or_else(|| missing(id.to_string()))
}

fn parent_of(doc: &HierarchyDocument, id: &str) -> Result<(String, usize), MutationError> {
    doc.pages
        .parent_of(id)
        .map(|(parent, index)| (parent.id.clone(), index))
        .ok_or_else(|| MutationError::PageNotFound(id.to_string()))
}
