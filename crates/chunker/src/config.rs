use serde::{Deserialize, Serialize};

use crate::error::{ChunkerError, Result};

/// Configuration for document chunking
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Chunk size threshold in bytes (soft limit; a chunk closes at the
    /// first structural boundary at or past this size)
    pub max_chars_per_chunk: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chars_per_chunk: 1600,
        }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chars_per_chunk == 0 {
            return Err(ChunkerError::invalid_config(
                "max_chars_per_chunk must be > 0",
            ));
        }
        Ok(())
    }
}
