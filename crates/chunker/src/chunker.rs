use crate::config::ChunkerConfig;
use crate::types::{DocumentChunk, Source};

/// Split a raw document into line-oriented chunks.
///
/// Lines accumulate into the current chunk; the chunk closes once the
/// accumulated byte length (each line counted as `len + 1` for its newline)
/// reaches `max_chars` and the current line, trimmed, ends with `>`. The
/// boundary heuristic keeps a chunk from stopping in the middle of a tag.
/// Whatever is left in the buffer becomes the final chunk, so a document
/// smaller than the threshold yields exactly one chunk.
#[must_use]
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut size = 0usize;

    for line in text.lines() {
        current.push(line);
        size += line.len() + 1;
        if size >= max_chars && line.trim().ends_with('>') {
            chunks.push(current.join("\n"));
            current.clear();
            size = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }
    chunks
}

/// Collapse whitespace runs to single spaces and trim both ends.
#[must_use]
pub fn normalize_space(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Chunk both snapshots into one ordered sequence: pre chunks first, then
/// post chunks, each numbered 0-based within its own source.
#[must_use]
pub fn chunk_documents(
    pre_text: &str,
    post_text: &str,
    config: &ChunkerConfig,
) -> Vec<DocumentChunk> {
    let pre_chunks = split_chunks(pre_text, config.max_chars_per_chunk);
    let post_chunks = split_chunks(post_text, config.max_chars_per_chunk);

    log::debug!(
        "chunked documents: pre={} post={} (threshold {} chars)",
        pre_chunks.len(),
        post_chunks.len(),
        config.max_chars_per_chunk
    );

    let mut chunks = Vec::with_capacity(pre_chunks.len() + post_chunks.len());
    for (i, raw) in pre_chunks.iter().enumerate() {
        chunks.push(DocumentChunk::new(Source::Pre, i, normalize_space(raw)));
    }
    for (i, raw) in post_chunks.iter().enumerate() {
        chunks.push(DocumentChunk::new(Source::Post, i, normalize_space(raw)));
    }
    chunks
}
