//! # confdiff Chunker
//!
//! Line-oriented chunking of pre/post configuration documents.
//!
//! Documents are split at structural boundaries: a chunk closes once it
//! reaches the configured byte threshold *and* the current line ends with a
//! closing angle bracket, so a chunk never stops mid-tag. Chunk text is
//! whitespace-normalized, ready for lexical indexing.

mod chunker;
mod config;
mod error;
mod types;

pub use chunker::{chunk_documents, normalize_space, split_chunks};
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use types::{DocumentChunk, Source};
