use std::fmt::Write as _;

use confdiff_compare::ComparisonReport;

/// How many entries each rendered list shows
const RENDER_LIMIT: usize = 20;

/// Render a comparison report as the three-section text summary:
/// Structure Same? / Totals / Differences. Rendered lists are capped at
/// twenty entries; the underlying report keeps more.
#[must_use]
pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Structure Same?");
    let _ = writeln!(out, "  {}", if report.structure_same { "Yes" } else { "No" });

    let _ = writeln!(out, "Totals");
    let _ = writeln!(
        out,
        "  pre: {}, post: {}",
        report.total_elements_pre, report.total_elements_post
    );

    let _ = writeln!(out, "Differences");
    let _ = writeln!(out, "  Tag frequency differences (top {RENDER_LIMIT}):");
    for diff in report.frequency_differences.iter().take(RENDER_LIMIT) {
        let _ = writeln!(out, "    {}: pre={} post={}", diff.tag, diff.pre, diff.post);
    }
    let _ = writeln!(out, "  Paths only in pre (top {RENDER_LIMIT}):");
    for path in report.only_in_pre_paths.iter().take(RENDER_LIMIT) {
        let _ = writeln!(out, "    {path}");
    }
    let _ = writeln!(out, "  Paths only in post (top {RENDER_LIMIT}):");
    for path in report.only_in_post_paths.iter().take(RENDER_LIMIT) {
        let _ = writeln!(out, "    {path}");
    }

    if !report.value_differences.is_empty() {
        let _ = writeln!(out, "  Value differences (top {RENDER_LIMIT}):");
        for diff in report.value_differences.iter().take(RENDER_LIMIT) {
            let _ = writeln!(
                out,
                "    {}: '{}' -> '{}'",
                diff.path, diff.pre, diff.post
            );
        }
    }

    out
}
