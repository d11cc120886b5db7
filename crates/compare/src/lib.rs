//! # confdiff Compare
//!
//! Structural and value comparison of two XML configuration snapshots.
//!
//! Both documents are parsed into element trees, then compared three ways:
//! the set of distinct root-to-node paths, per-tag occurrence counts, and
//! (in extended mode) positional value signatures of leaf nodes sharing a
//! path. Each report is computed fresh; nothing is cached between calls.
//!
//! Known limitation: namespace prefixes are stripped from tag names, so
//! same-named elements from different namespaces are conflated. This
//! mirrors the comparison the reports were designed around and is not
//! silently "fixed" here.

mod compare;
mod error;
mod report;
mod tree;

pub use compare::compare;
pub use error::{CompareError, Result};
pub use report::{
    ComparisonReport, FrequencyDiff, ValueDiff, MAX_FREQUENCY_DIFFS, MAX_PATH_DIFFS,
    MAX_VALUE_DIFFS,
};
pub use tree::{parse, Element};
