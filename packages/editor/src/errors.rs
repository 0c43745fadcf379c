//! Error types for the editor

use pagemap_layout::LayoutError;
use pagemap_model::ParseError;
use thiserror::Error;

use crate::mutations::MutationError;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Unknown id: {0}")]
    UnknownId(String),

    #[error("Page {0} has level 0 (levels start at 1)")]
    InvalidLevel(String),

    #[error("Document is nested too deeply at page {0}")]
    TooDeep(String),

    #[error("Page {0} is pinned at a non-finite position")]
    InvalidPosition(String),

    #[error("Could not serialize document: {0}")]
    Serialize(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Reorder error: {0}")]
    Reorder(ReorderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ParseError> for EditorError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Malformed(inner) => EditorError::MalformedDocument(inner.to_string()),
            ParseError::DuplicateId(id) => EditorError::DuplicateId(id),
            ParseError::InvalidLevel(id) => EditorError::InvalidLevel(id),
            ParseError::TooDeep(id) => EditorError::TooDeep(id),
            ParseError::InvalidPosition(id) => EditorError::InvalidPosition(id),
            ParseError::Serialize(inner) => EditorError::Serialize(inner.to_string()),
        }
    }
}

impl From<FlattenError> for EditorError {
    fn from(e: FlattenError) -> Self {
        match e {
            FlattenError::DuplicateId(id) => EditorError::DuplicateId(id),
        }
    }
}

impl From<ReorderError> for EditorError {
    fn from(e: ReorderError) -> Self {
        match e {
            ReorderError::UnknownId(id) => EditorError::UnknownId(id),
            ReorderError::DuplicateId(id) => EditorError::DuplicateId(id),
            other => EditorError::Reorder(other),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlattenError {
    #[error("Page id {0} appears more than once")]
    DuplicateId(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReorderError {
    #[error("Unknown item: {0}")]
    UnknownId(String),

    #[error("Item {0} appears more than once; cannot identify it by value")]
    DuplicateId(String),

    #[error("Index {index} out of range for {len} items")]
    OutOfRange { index: usize, len: usize },
}
