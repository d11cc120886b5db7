//! # confdiff Index
//!
//! BM25-scored lexical retrieval over chunked pre/post documents.
//!
//! The index is an immutable value: [`LexicalIndex::build`] chunks both
//! snapshots, tokenizes every chunk, and freezes the document-frequency map
//! and average chunk length. Rebuilding produces a fresh index rather than
//! mutating shared state, so multiple indexes can coexist and queries never
//! observe a half-built one.

mod bm25;
mod retrieve;
mod tokenizer;

pub use bm25::Bm25Scorer;
pub use retrieve::{LexicalIndex, RetrievedContext};
pub use tokenizer::tokenize;
