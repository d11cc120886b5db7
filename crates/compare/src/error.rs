use thiserror::Error;

/// Result type for comparator operations
pub type Result<T> = std::result::Result<T, CompareError>;

/// Errors that can occur while comparing documents
#[derive(Error, Debug)]
pub enum CompareError {
    /// One of the documents is not well-formed XML
    #[error("Failed to parse XML: {0}")]
    Parse(String),
}

impl CompareError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
