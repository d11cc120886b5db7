use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9_\-]+").expect("token pattern is valid")
});

/// Extract lowercase word tokens from text.
///
/// Tokens are maximal runs of `[A-Za-z0-9_-]`, so tag names, attribute
/// names, and identifiers like `enbId` or `dl-earfcn` survive intact.
/// Queries and chunks go through this same function.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
