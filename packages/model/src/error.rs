use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Could not serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Duplicate page id: {0}")]
    DuplicateId(String),

    #[error("Page {0} has level 0 (levels start at 1)")]
    InvalidLevel(String),

    #[error("Page {0} is nested deeper than {max} levels", max = crate::MAX_DEPTH)]
    TooDeep(String),

    #[error("Page {0} is pinned at a non-finite position")]
    InvalidPosition(String),
}

impl ParseError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
