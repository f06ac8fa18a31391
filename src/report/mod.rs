//! Aggregate views over the filtered records.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{ActivityCategory, Branch, BranchMatrix, BranchRow, EnrichedRecord, YearMonth};

pub mod format;

pub use format::*;

/// Count of records per branch per category.
///
/// Rows follow `Branch::ALL` order and only include branches that occur;
/// columns are always every category, zero-filled.
pub fn branch_matrix(records: &[EnrichedRecord]) -> BranchMatrix {
    let columns = ActivityCategory::ALL.to_vec();
    let mut counts: HashMap<Branch, Vec<usize>> = HashMap::new();

    for r in records {
        let row = counts.entry(r.branch).or_insert_with(|| vec![0; columns.len()]);
        if let Some(col) = columns.iter().position(|c| *c == r.activity) {
            row[col] += 1;
        }
    }

    let rows = Branch::ALL
        .into_iter()
        .filter_map(|branch| counts.remove(&branch).map(|counts| BranchRow { branch, counts }))
        .collect();

    BranchMatrix { columns, rows }
}

/// Records per category, most frequent first.
///
/// Ties keep the order in which categories were first seen.
pub fn category_counts(records: &[EnrichedRecord]) -> Vec<(ActivityCategory, usize)> {
    let mut out: Vec<(ActivityCategory, usize)> = Vec::new();
    for r in records {
        match out.iter_mut().find(|(c, _)| *c == r.activity) {
            Some((_, n)) => *n += 1,
            None => out.push((r.activity, 1)),
        }
    }
    // Stable sort keeps first-seen order for equal counts.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Records per calendar month of the effective date, oldest first.
///
/// Records without an effective date are not counted.
pub fn monthly_trend(records: &[EnrichedRecord]) -> Vec<(YearMonth, usize)> {
    let mut buckets: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for dt in records.iter().filter_map(|r| r.effective_date.as_ref()) {
        *buckets.entry(YearMonth::of(dt)).or_default() += 1;
    }
    buckets.into_iter().collect()
}
