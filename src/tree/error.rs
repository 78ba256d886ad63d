//! Error types for building and reading tree documents.

use thiserror::Error;

/// Errors that can occur while building or reading a [`TreeDocument`](super::TreeDocument).
#[derive(Debug, Error)]
pub enum TreeError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while reading a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input contained no element at all.
    #[error("document has no root element")]
    Empty,

    /// A second top-level element was started.
    #[error("document has more than one root element: {0}")]
    MultipleRoots(String),

    /// The input ended while elements were still open.
    #[error("Unclosed element: {0}")]
    Unclosed(String),

    /// An end tag without a matching start tag.
    #[error("Unbalanced end tag")]
    UnbalancedEnd,
}

impl TreeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}
