use serde::{Deserialize, Serialize};

use confdiff_chunker::{chunk_documents, ChunkerConfig, DocumentChunk};

use crate::bm25::Bm25Scorer;

/// Ranked retrieval payload, pre-formatted for prompt assembly.
///
/// Kept deliberately small: labeled chunk text for the model, parallel ids
/// for the caller to cite.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievedContext {
    /// Labeled chunk blocks in rank order, blank-line separated
    pub formatted: String,

    /// `source:chunk_id` strings matching the rank order
    pub ids: Vec<String>,
}

impl RetrievedContext {
    /// True when no chunk matched the query
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Immutable BM25 index over the chunked pre/post snapshots.
///
/// Built once, queried many times. `build` on fresh inputs returns a new
/// value; nothing is mutated in place, so concurrent readers of an existing
/// index are unaffected by a rebuild.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    chunks: Vec<DocumentChunk>,
    scorer: Bm25Scorer,
}

impl LexicalIndex {
    /// Chunk both snapshots and freeze the BM25 statistics over the combined
    /// sequence (pre chunks first, then post, in document order).
    #[must_use]
    pub fn build(pre_text: &str, post_text: &str, config: &ChunkerConfig) -> Self {
        let chunks = chunk_documents(pre_text, post_text, config);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let scorer = Bm25Scorer::new(&texts);
        log::info!("lexical index built over {} chunks", chunks.len());
        Self { chunks, scorer }
    }

    /// All chunks in sequence order
    #[must_use]
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    /// Number of chunks in the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the index holds no chunks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Top-k chunks for a query, best first.
    #[must_use]
    pub fn top_k(&self, query: &str, k: usize) -> Vec<&DocumentChunk> {
        self.scorer
            .score_query(query)
            .into_iter()
            .take(k)
            .map(|(idx, _)| &self.chunks[idx])
            .collect()
    }

    /// Retrieve the top-k chunks formatted for prompt context.
    ///
    /// When nothing matches (or the index is empty) both fields come back
    /// empty; substituting a placeholder is the caller's concern.
    #[must_use]
    pub fn retrieve(&self, query: &str, k: usize) -> RetrievedContext {
        let top = self.top_k(query, k);
        log::debug!("retrieve: {} of {} chunks for query", top.len(), self.len());

        let ids = top.iter().map(|c| c.id()).collect();
        let blocks: Vec<String> = top.iter().map(|c| c.labeled()).collect();
        RetrievedContext {
            formatted: blocks.join("\n\n"),
            ids,
        }
    }
}
