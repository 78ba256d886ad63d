//! Error type for the analysis components.

use thiserror::Error;

/// Errors surfaced by the profiler, the pattern finder and the
/// cross-reference analyzer.
///
/// Only input that cannot be walked at all is reported here. A single
/// element, reference or pattern definition that cannot be processed is
/// logged and skipped instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The document has no root element.
    #[error("document has no root element")]
    EmptyDocument,

    /// A node handle that does not belong to the document.
    #[error("node #{0} does not belong to this document")]
    InvalidNode(usize),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(String),

    /// Export or import of a result failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnalysisError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
