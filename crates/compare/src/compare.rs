use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::report::{
    ComparisonReport, FrequencyDiff, ValueDiff, MAX_FREQUENCY_DIFFS, MAX_PATH_DIFFS,
    MAX_VALUE_DIFFS,
};
use crate::tree::{parse, Element};

/// Distinct root-to-node paths, depth-first pre-order.
///
/// Sibling repeats collapse into one entry; only the set of path strings
/// matters downstream.
fn collect_paths(root: &Element) -> BTreeSet<String> {
    fn walk(node: &Element, parent: &str, paths: &mut BTreeSet<String>) {
        let path = if parent.is_empty() {
            node.tag.clone()
        } else {
            format!("{parent}/{}", node.tag)
        };
        paths.insert(path.clone());
        for child in &node.children {
            walk(child, &path, paths);
        }
    }
    let mut paths = BTreeSet::new();
    walk(root, "", &mut paths);
    paths
}

/// Occurrence count per tag name, every node instance counted.
fn tag_counts(root: &Element) -> BTreeMap<String, usize> {
    fn walk(node: &Element, counts: &mut BTreeMap<String, usize>) {
        *counts.entry(node.tag.clone()).or_insert(0) += 1;
        for child in &node.children {
            walk(child, counts);
        }
    }
    let mut counts = BTreeMap::new();
    walk(root, &mut counts);
    counts
}

/// Attribute-and-text fingerprint of a leaf node: attributes sorted by key
/// as `key=value` space-joined, then trimmed text, `|`-separated with empty
/// components omitted.
fn value_signature(node: &Element) -> String {
    let mut attrs: Vec<&(String, String)> = node.attributes.iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(&b.0));
    let attr_part = attrs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ");
    let text_part = node.text.trim();

    match (attr_part.is_empty(), text_part.is_empty()) {
        (true, true) => String::new(),
        (true, false) => text_part.to_string(),
        (false, true) => attr_part,
        (false, false) => format!("{attr_part}|{text_part}"),
    }
}

/// Leaf value signatures grouped by path, each group in traversal order so
/// same-path leaves can be compared positionally.
fn leaf_values(root: &Element) -> BTreeMap<String, Vec<String>> {
    fn walk(node: &Element, parent: &str, values: &mut BTreeMap<String, Vec<String>>) {
        let path = if parent.is_empty() {
            node.tag.clone()
        } else {
            format!("{parent}/{}", node.tag)
        };
        if node.is_leaf() {
            values.entry(path.clone()).or_default().push(value_signature(node));
        }
        for child in &node.children {
            walk(child, &path, values);
        }
    }
    let mut values = BTreeMap::new();
    walk(root, "", &mut values);
    values
}

/// Compare two snapshots structurally and, in extended mode, by leaf value.
///
/// Either document failing to parse surfaces as [`crate::CompareError::Parse`]
/// with the reader's message; a report is never returned in that case. With
/// `include_value_diffs` false the short report is produced, identical except
/// for an empty `value_differences`.
pub fn compare(
    pre_text: &str,
    post_text: &str,
    include_value_diffs: bool,
) -> Result<ComparisonReport> {
    let pre_root = parse(pre_text)?;
    let post_root = parse(post_text)?;

    let pre_paths = collect_paths(&pre_root);
    let post_paths = collect_paths(&post_root);
    let structure_same = pre_paths == post_paths;

    let only_in_pre_paths: Vec<String> = pre_paths
        .difference(&post_paths)
        .take(MAX_PATH_DIFFS)
        .cloned()
        .collect();
    let only_in_post_paths: Vec<String> = post_paths
        .difference(&pre_paths)
        .take(MAX_PATH_DIFFS)
        .cloned()
        .collect();

    let pre_counts = tag_counts(&pre_root);
    let post_counts = tag_counts(&post_root);
    let total_elements_pre: usize = pre_counts.values().sum();
    let total_elements_post: usize = post_counts.values().sum();

    let all_tags: BTreeSet<&String> = pre_counts.keys().chain(post_counts.keys()).collect();
    let frequency_differences: Vec<FrequencyDiff> = all_tags
        .into_iter()
        .filter_map(|tag| {
            let pre = pre_counts.get(tag).copied().unwrap_or(0);
            let post = post_counts.get(tag).copied().unwrap_or(0);
            (pre != post).then(|| FrequencyDiff {
                tag: tag.clone(),
                pre,
                post,
            })
        })
        .take(MAX_FREQUENCY_DIFFS)
        .collect();

    let mut value_differences = Vec::new();
    if include_value_diffs {
        let pre_values = leaf_values(&pre_root);
        let post_values = leaf_values(&post_root);

        'paths: for (path, pre_list) in &pre_values {
            let Some(post_list) = post_values.get(path) else {
                continue;
            };
            for (pre_sig, post_sig) in pre_list.iter().zip(post_list.iter()) {
                if pre_sig != post_sig {
                    let tag = path.rsplit('/').next().unwrap_or(path).to_string();
                    value_differences.push(ValueDiff {
                        tag,
                        path: path.clone(),
                        pre: pre_sig.clone(),
                        post: post_sig.clone(),
                    });
                    if value_differences.len() >= MAX_VALUE_DIFFS {
                        break 'paths;
                    }
                }
            }
        }
    }

    log::debug!(
        "compare: structure_same={} pre={} post={} freq_diffs={} value_diffs={}",
        structure_same,
        total_elements_pre,
        total_elements_post,
        frequency_differences.len(),
        value_differences.len()
    );

    Ok(ComparisonReport {
        structure_same,
        total_elements_pre,
        total_elements_post,
        only_in_pre_paths,
        only_in_post_paths,
        frequency_differences,
        value_differences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_documents() {
        let doc = "<root><cell><pci>241</pci></cell></root>";
        let report = compare(doc, doc, true).unwrap();
        assert!(report.structure_same);
        assert!(report.only_in_pre_paths.is_empty());
        assert!(report.only_in_post_paths.is_empty());
        assert!(report.frequency_differences.is_empty());
        assert!(report.value_differences.is_empty());
        assert_eq!(report.total_elements_pre, report.total_elements_post);
    }

    #[test]
    fn test_frequency_difference_counts_every_instance() {
        // pre tags {A, B, B}, post tags {A, B}
        let pre = "<A><B/><B/></A>";
        let post = "<A><B/></A>";
        let report = compare(pre, post, false).unwrap();
        assert_eq!(
            report.frequency_differences,
            vec![FrequencyDiff {
                tag: "B".into(),
                pre: 2,
                post: 1,
            }]
        );
        assert_eq!(report.total_elements_pre, 3);
        assert_eq!(report.total_elements_post, 2);
        // B's path exists in both trees; multiplicity does not affect paths.
        assert!(report.structure_same);
    }

    #[test]
    fn test_path_differences_sorted() {
        let pre = "<r><z/><a/></r>";
        let post = "<r><m/></r>";
        let report = compare(pre, post, false).unwrap();
        assert!(!report.structure_same);
        assert_eq!(report.only_in_pre_paths, vec!["r/a", "r/z"]);
        assert_eq!(report.only_in_post_paths, vec!["r/m"]);
    }

    #[test]
    fn test_diff_symmetry() {
        let a = "<r><x/><y/></r>";
        let b = "<r><y/><z/></r>";
        let ab = compare(a, b, false).unwrap();
        let ba = compare(b, a, false).unwrap();
        assert_eq!(ab.only_in_pre_paths, ba.only_in_post_paths);
        assert_eq!(ab.only_in_post_paths, ba.only_in_pre_paths);
    }

    #[test]
    fn test_value_difference_positional() {
        let pre = "<r><v>1</v><v>2</v></r>";
        let post = "<r><v>1</v><v>3</v></r>";
        let report = compare(pre, post, true).unwrap();
        assert_eq!(
            report.value_differences,
            vec![ValueDiff {
                tag: "v".into(),
                path: "r/v".into(),
                pre: "2".into(),
                post: "3".into(),
            }]
        );
    }

    #[test]
    fn test_value_signature_includes_attributes() {
        let pre = "<r><v b=\"2\" a=\"1\">x</v></r>";
        let post = "<r><v b=\"2\" a=\"1\">y</v></r>";
        let report = compare(pre, post, true).unwrap();
        assert_eq!(report.value_differences[0].pre, "a=1 b=2|x");
        assert_eq!(report.value_differences[0].post, "a=1 b=2|y");
    }

    #[test]
    fn test_value_signature_empty_components_omitted() {
        let pre = "<r><v>x</v><w a=\"1\"/></r>";
        let post = "<r><v>y</v><w a=\"2\"/></r>";
        let report = compare(pre, post, true).unwrap();
        assert_eq!(report.value_differences[0].pre, "x");
        assert_eq!(report.value_differences[1].pre, "a=1");
    }

    #[test]
    fn test_extra_leaves_beyond_shorter_list_ignored() {
        let pre = "<r><v>1</v></r>";
        let post = "<r><v>1</v><v>9</v></r>";
        let report = compare(pre, post, true).unwrap();
        assert!(report.value_differences.is_empty());
        // The count difference still shows up.
        assert_eq!(report.frequency_differences[0].tag, "v");
    }

    #[test]
    fn test_short_mode_skips_value_diffs() {
        let pre = "<r><v>1</v></r>";
        let post = "<r><v>2</v></r>";
        let report = compare(pre, post, false).unwrap();
        assert!(report.value_differences.is_empty());
        let extended = compare(pre, post, true).unwrap();
        assert_eq!(extended.value_differences.len(), 1);
    }

    #[test]
    fn test_namespace_conflation() {
        let pre = "<r xmlns:a=\"urn:a\"><a:item>1</a:item></r>";
        let post = "<r xmlns:b=\"urn:b\"><b:item>1</b:item></r>";
        let report = compare(pre, post, true).unwrap();
        assert!(report.structure_same, "prefixes stripped, paths conflate");
        assert!(report.value_differences.is_empty());
    }

    #[test]
    fn test_parse_error_not_silent() {
        let err = compare("not xml <", "<r/>", false).unwrap_err();
        assert!(matches!(err, crate::CompareError::Parse(_)));
        let err = compare("<r/>", "<a><b></a>", false).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse XML:"));
    }

    #[test]
    fn test_truncation_caps() {
        let mut pre = String::from("<r>");
        let mut post = String::from("<r>");
        for i in 0..300 {
            pre.push_str(&format!("<p{i}/>"));
            post.push_str(&format!("<q{i}/>"));
        }
        pre.push_str("</r>");
        post.push_str("</r>");
        let report = compare(&pre, &post, true).unwrap();
        assert_eq!(report.only_in_pre_paths.len(), MAX_PATH_DIFFS);
        assert_eq!(report.only_in_post_paths.len(), MAX_PATH_DIFFS);
        assert_eq!(report.frequency_differences.len(), MAX_FREQUENCY_DIFFS);
        // Totals are computed over the whole trees regardless of truncation.
        assert_eq!(report.total_elements_pre, 301);
    }

    #[test]
    fn test_value_diff_global_cap() {
        let mut pre = String::from("<r>");
        let mut post = String::from("<r>");
        for _ in 0..MAX_VALUE_DIFFS + 50 {
            pre.push_str("<v>a</v>");
            post.push_str("<v>b</v>");
        }
        pre.push_str("</r>");
        post.push_str("</r>");
        let report = compare(&pre, &post, true).unwrap();
        assert_eq!(report.value_differences.len(), MAX_VALUE_DIFFS);
    }
}
