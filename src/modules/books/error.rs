use thiserror::Error;

/// Failures of the book operations, before they are mapped to HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("book name is required")]
    MissingName,

    #[error("readPage {read_page} exceeds pageCount {page_count}")]
    InvalidPageRange { read_page: u32, page_count: u32 },

    #[error("book {0} not found")]
    NotFound(String),

    /// A freshly appended record is missing from the collection
    #[error("book {0} missing right after insert")]
    InternalInconsistency(String),

    #[error("book store lock poisoned")]
    StorePoisoned,
}
