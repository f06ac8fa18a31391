//! JSON export of the aggregate views.
//!
//! The JSON file is the script-friendly twin of the XLSX summary sheets: it
//! carries the window, row bookkeeping and the three count views, but not the
//! per-article rows.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{ActivityCategory, BranchMatrix, DateWindow, ReportBundle, RunStats, YearMonth};
use crate::error::{AppError, EXIT_OUTPUT};

#[derive(Debug, Serialize)]
pub struct SummaryFile<'a> {
    pub tool: &'static str,
    pub window: DateWindow,
    pub stats: RunStats,
    pub categories: Vec<CategoryCount>,
    pub branches: &'a BranchMatrix,
    pub monthly_trend: Vec<MonthCount>,
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: ActivityCategory,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MonthCount {
    pub month: YearMonth,
    pub count: usize,
}

impl<'a> SummaryFile<'a> {
    pub fn from_bundle(bundle: &'a ReportBundle) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            window: bundle.window,
            stats: bundle.stats,
            categories: bundle
                .category_counts
                .iter()
                .map(|(category, count)| CategoryCount {
                    category: *category,
                    count: *count,
                })
                .collect(),
            branches: &bundle.branch_matrix,
            monthly_trend: bundle
                .monthly_trend
                .iter()
                .map(|(month, count)| MonthCount {
                    month: *month,
                    count: *count,
                })
                .collect(),
        }
    }
}

/// Write the summary JSON file.
pub fn write_summary_json(path: &Path, bundle: &ReportBundle) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    if let Err(e) = serde_json::to_writer_pretty(file, &SummaryFile::from_bundle(bundle)) {
        // Do not leave a truncated export behind.
        let _ = std::fs::remove_file(path);
        return Err(AppError::new(
            EXIT_OUTPUT,
            format!("Failed to write summary JSON '{}': {e}", path.display()),
        ));
    }

    Ok(())
}
