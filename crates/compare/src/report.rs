use serde::{Deserialize, Serialize};

/// Cap on reported paths unique to one snapshot (per direction)
pub const MAX_PATH_DIFFS: usize = 50;

/// Cap on reported tag frequency differences
pub const MAX_FREQUENCY_DIFFS: usize = 100;

/// Cap on reported leaf value differences (global, across all paths)
pub const MAX_VALUE_DIFFS: usize = 200;

/// A tag whose occurrence count changed between snapshots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrequencyDiff {
    /// Namespace-stripped tag name
    pub tag: String,

    /// Occurrences in the pre snapshot
    pub pre: usize,

    /// Occurrences in the post snapshot
    pub post: usize,
}

/// A leaf whose value signature changed at the same path and position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueDiff {
    /// Last path segment, the most informative label
    pub tag: String,

    /// Slash-joined path from root to the leaf
    pub path: String,

    /// Value signature in the pre snapshot
    pub pre: String,

    /// Value signature in the post snapshot
    pub post: String,
}

/// Outcome of comparing two snapshots.
///
/// `value_differences` is populated only in extended mode; the short report
/// carries it empty so the serialized shape is identical either way. The
/// path and diff lists are silently truncated at their caps — totals are
/// computed over the whole trees and are never affected by truncation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Whether the distinct path sets of the two trees are equal
    pub structure_same: bool,

    /// Total node count in the pre snapshot
    pub total_elements_pre: usize,

    /// Total node count in the post snapshot
    pub total_elements_post: usize,

    /// Paths present only in pre, sorted, at most [`MAX_PATH_DIFFS`]
    pub only_in_pre_paths: Vec<String>,

    /// Paths present only in post, sorted, at most [`MAX_PATH_DIFFS`]
    pub only_in_post_paths: Vec<String>,

    /// Tags with differing counts, sorted by tag, at most [`MAX_FREQUENCY_DIFFS`]
    pub frequency_differences: Vec<FrequencyDiff>,

    /// Positional leaf value changes, at most [`MAX_VALUE_DIFFS`]
    pub value_differences: Vec<ValueDiff>,
}
