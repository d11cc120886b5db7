use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two snapshots a chunk was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The "before" snapshot
    Pre,
    /// The "after" snapshot
    Post,
}

impl Source {
    /// Lowercase name used in chunk ids (`pre:3`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }

    /// Uppercase name used in context labels (`[PRE #3]`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pre => "PRE",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized slice of one source document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentChunk {
    /// Snapshot this chunk belongs to
    pub source: Source,

    /// 0-based position within this source's chunk sequence
    pub chunk_id: usize,

    /// Whitespace-normalized chunk text
    pub text: String,
}

impl DocumentChunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(source: Source, chunk_id: usize, text: String) -> Self {
        Self {
            source,
            chunk_id,
            text,
        }
    }

    /// Stable identifier, `source:chunk_id`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}", self.source, self.chunk_id)
    }

    /// Context label block, `[SOURCE #chunk_id]\ntext`
    #[must_use]
    pub fn labeled(&self) -> String {
        format!("[{} #{}]\n{}", self.source.label(), self.chunk_id, self.text)
    }
}
