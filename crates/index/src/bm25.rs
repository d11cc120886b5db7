use std::collections::{BTreeSet, HashMap};

use crate::tokenizer::tokenize;

/// BM25 tuning constants (Okapi defaults used by the retrieval layer)
const K1: f64 = 1.5;
const B: f64 = 0.75;

/// BM25 scorer over a fixed sequence of documents.
///
/// All statistics (term frequencies, document frequencies, average length)
/// are computed once at construction and never mutated. A rebuild means a
/// new `Bm25Scorer` value.
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    /// Per-document term frequency maps, in sequence order
    doc_tfs: Vec<HashMap<String, usize>>,

    /// Per-document token counts
    doc_lengths: Vec<usize>,

    /// term -> number of documents containing it
    term_df: HashMap<String, usize>,

    /// Average document length in tokens
    avgdl: f64,
}

impl Bm25Scorer {
    /// Tokenize every document and freeze the corpus statistics.
    #[must_use]
    pub fn new<S: AsRef<str>>(docs: &[S]) -> Self {
        let mut doc_tfs = Vec::with_capacity(docs.len());
        let mut doc_lengths = Vec::with_capacity(docs.len());
        let mut term_df: HashMap<String, usize> = HashMap::new();

        for doc in docs {
            let terms = tokenize(doc.as_ref());
            doc_lengths.push(terms.len());

            let mut tf: HashMap<String, usize> = HashMap::new();
            for term in terms {
                *tf.entry(term).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *term_df.entry(term.clone()).or_insert(0) += 1;
            }
            doc_tfs.push(tf);
        }

        let total_tokens: usize = doc_lengths.iter().sum();
        let avgdl = total_tokens as f64 / doc_tfs.len().max(1) as f64;

        log::debug!(
            "bm25 corpus: {} docs, {} distinct terms, avgdl={:.1}",
            doc_tfs.len(),
            term_df.len(),
            avgdl
        );

        Self {
            doc_tfs,
            doc_lengths,
            term_df,
            avgdl,
        }
    }

    /// Number of documents in the corpus
    #[must_use]
    pub fn doc_count(&self) -> usize {
        self.doc_tfs.len()
    }

    /// Score every document containing at least one query term.
    ///
    /// Returns `(doc_index, score)` pairs sorted by descending score; equal
    /// scores keep ascending document order so rankings are reproducible.
    /// Query terms absent from the whole corpus contribute nothing, and a
    /// query with no known terms yields an empty ranking.
    #[must_use]
    pub fn score_query(&self, query: &str) -> Vec<(usize, f64)> {
        // Deduplicated and sorted: a fixed term order keeps floating-point
        // accumulation identical across calls and rebuilds.
        let query_terms: BTreeSet<String> = tokenize(query).into_iter().collect();
        let n = self.doc_count() as f64;
        let avgdl = self.avgdl.max(1e-6);

        let mut scores: HashMap<usize, f64> = HashMap::new();
        for term in &query_terms {
            let Some(&df) = self.term_df.get(term) else {
                continue;
            };
            let idf = (((n - df as f64 + 0.5) / (df as f64 + 0.5)).ln()).max(0.0);

            for (idx, tf_map) in self.doc_tfs.iter().enumerate() {
                let Some(&tf) = tf_map.get(term) else {
                    continue;
                };
                let tf = tf as f64;
                let dl = self.doc_lengths[idx] as f64;
                let denom = tf + K1 * (1.0 - B + B * (dl / avgdl));
                // A matching document stays in the ranking even when a
                // saturated term drives its contribution to zero.
                *scores.entry(idx).or_insert(0.0) += idf * (tf * (K1 + 1.0)) / denom;
            }
        }

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked
    }
}
