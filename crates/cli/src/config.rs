use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Process configuration, loadable from a TOML file.
///
/// Every field has a default so a missing or partial file still yields a
/// usable config; command-line flags override individual values afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the "before" snapshot
    pub pre_path: PathBuf,

    /// Path to the "after" snapshot
    pub post_path: PathBuf,

    /// Default number of snippets to retrieve
    pub max_snippets: usize,

    /// Chunk size threshold in bytes
    pub max_chars_per_chunk: usize,

    /// Cap on raw document bytes in full-context mode
    pub max_full_context_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pre_path: PathBuf::from("pre.xml"),
            post_path: PathBuf::from("post.xml"),
            max_snippets: 8,
            max_chars_per_chunk: 1600,
            max_full_context_chars: 1_500_000,
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file, or defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}
