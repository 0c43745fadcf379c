use thiserror::Error;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Edge {from} -> {to} references unknown node {missing}")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },

    #[error("Graph contains a cycle through node {0}")]
    Cycle(String),
}
