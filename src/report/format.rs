//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the classification/aggregation code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::domain::{BranchMatrix, ReportBundle, RunStats};

/// Format the run summary: row bookkeeping, category totals, branch matrix and
/// monthly trend.
pub fn format_run_summary(bundle: &ReportBundle) -> String {
    let mut out = String::new();

    out.push_str("=== 公众号文章活动分析 ===\n");
    out.push_str(&format!(
        "Window: {} .. {}\n",
        bundle.window.start, bundle.window.end
    ));
    out.push_str(&format_stats(&bundle.stats));

    out.push_str("\n活动类型统计:\n");
    if bundle.category_counts.is_empty() {
        out.push_str("  (no rows)\n");
    }
    for (category, n) in &bundle.category_counts {
        out.push_str(&format!("  {:<8} {n:>6}\n", category.label()));
    }

    out.push_str("\n各分会活动对比:\n");
    out.push_str(&format_matrix(&bundle.branch_matrix));

    out.push_str("\n时间趋势分析:\n");
    if bundle.monthly_trend.is_empty() {
        out.push_str("  (no rows)\n");
    }
    for (month, n) in &bundle.monthly_trend {
        out.push_str(&format!("  {month} {n:>6} {}\n", bar(*n)));
    }

    out
}

/// One-line confirmation printed after the report is written.
pub fn format_output_path(path: &Path) -> String {
    format!("分析完成！结果已保存至：{}", path.display())
}

fn format_stats(stats: &RunStats) -> String {
    format!(
        "Rows: read={} | no title={} | no date={} | outside window={} | used={}\n",
        stats.rows_read,
        stats.rows_without_title,
        stats.rows_without_date,
        stats.rows_outside_window,
        stats.rows_used
    )
}

fn format_matrix(matrix: &BranchMatrix) -> String {
    if matrix.rows.is_empty() {
        return "  (no rows)\n".to_string();
    }

    let mut out = String::new();
    // Column headers are numbered to keep the table narrow; the legend maps
    // numbers back to category names.
    out.push_str(&format!("  {:<16}", ""));
    for idx in 0..matrix.columns.len() {
        out.push_str(&format!(" {:>4}", format!("c{}", idx + 1)));
    }
    out.push('\n');

    for row in &matrix.rows {
        out.push_str(&format!("  {:<16}", truncate(row.branch.label(), 16)));
        for n in &row.counts {
            out.push_str(&format!(" {n:>4}"));
        }
        out.push('\n');
    }

    let legend: Vec<String> = matrix
        .columns
        .iter()
        .enumerate()
        .map(|(idx, c)| format!("c{}={}", idx + 1, c.label()))
        .collect();
    out.push_str(&format!("  {}\n", legend.join(" ")));
    out
}

fn bar(n: usize) -> String {
    const MAX_BAR: usize = 40;
    "#".repeat(n.min(MAX_BAR))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
