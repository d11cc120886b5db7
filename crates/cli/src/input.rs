use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a document permissively: invalid UTF-8 sequences are replaced
/// rather than rejected, since exported configuration dumps occasionally
/// carry stray bytes.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a document, truncated to `max_chars` bytes of decoded text.
/// Used by full-context mode to bound prompt size.
pub fn read_text_capped(path: &Path, max_chars: usize) -> Result<String> {
    let mut text = read_text(path)?;
    if text.len() > max_chars {
        // Back off to a char boundary so truncation cannot split a code point.
        let mut cut = max_chars;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    Ok(text)
}
