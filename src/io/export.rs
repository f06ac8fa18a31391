//! Write the four-sheet XLSX report.
//!
//! Sheet layout:
//! - `原始数据清洗版`: every source column (publish time normalized) plus the
//!   three derived columns
//! - `各分会活动对比`: branch × category counts
//! - `活动类型统计`: category totals
//! - `时间趋势分析`: records per month

use std::path::Path;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::domain::{COL_ACTIVITY, COL_BRANCH, COL_EFFECTIVE_DATE, COL_PUBLISH_TIME, REQUIRED_COLUMNS, ReportBundle};
use crate::error::{AppError, EXIT_OUTPUT};

pub const SHEET_CLEANED: &str = "原始数据清洗版";
pub const SHEET_BRANCHES: &str = "各分会活动对比";
pub const SHEET_CATEGORIES: &str = "活动类型统计";
pub const SHEET_TREND: &str = "时间趋势分析";

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the report workbook to `path`, replacing any existing file.
pub fn write_report_xlsx(path: &Path, bundle: &ReportBundle) -> Result<(), AppError> {
    let mut workbook = build_workbook(bundle)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to build report workbook: {e}")))?;
    workbook
        .save(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write report '{}': {e}", path.display())))?;
    Ok(())
}

fn build_workbook(bundle: &ReportBundle) -> Result<Workbook, XlsxError> {
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    write_cleaned_sheet(workbook.add_worksheet().set_name(SHEET_CLEANED)?, bundle, &header)?;
    write_branch_sheet(workbook.add_worksheet().set_name(SHEET_BRANCHES)?, bundle, &header)?;
    write_category_sheet(workbook.add_worksheet().set_name(SHEET_CATEGORIES)?, bundle, &header)?;
    write_trend_sheet(workbook.add_worksheet().set_name(SHEET_TREND)?, bundle, &header)?;

    Ok(workbook)
}

fn write_cleaned_sheet(sheet: &mut Worksheet, bundle: &ReportBundle, header: &Format) -> Result<(), XlsxError> {
    let time_col = bundle.headers.iter().position(|h| h == COL_PUBLISH_TIME);
    // Required columns are free text; a title such as "2024" stays a string.
    let text_cols: Vec<bool> = bundle
        .headers
        .iter()
        .map(|h| REQUIRED_COLUMNS.contains(&h.as_str()))
        .collect();
    let derived = [COL_ACTIVITY, COL_EFFECTIVE_DATE, COL_BRANCH];

    for (col, name) in bundle.headers.iter().map(String::as_str).chain(derived).enumerate() {
        sheet.write_string_with_format(0, col as u16, name, header)?;
    }

    let base = bundle.headers.len();
    for (idx, r) in bundle.records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in r.article.raw.iter().enumerate() {
            let c = col as u16;
            if Some(col) == time_col {
                sheet.write_string(row, c, fmt_timestamp(r.published_at.as_ref()))?;
            } else if let Some(n) = numeric_cell(value).filter(|_| !text_cols[col]) {
                sheet.write_number(row, c, n)?;
            } else {
                sheet.write_string(row, c, value.as_str())?;
            }
        }
        sheet.write_string(row, base as u16, r.activity.label())?;
        sheet.write_string(row, base as u16 + 1, fmt_timestamp(r.effective_date.as_ref()))?;
        sheet.write_string(row, base as u16 + 2, r.branch.label())?;
    }

    Ok(())
}

/// Pass-through cells that read as a finite number (view counts and the
/// like) are written as numbers so they sort and sum in Excel.
fn numeric_cell(value: &str) -> Option<f64> {
    let n: f64 = value.trim().parse().ok()?;
    n.is_finite().then_some(n)
}

fn write_branch_sheet(sheet: &mut Worksheet, bundle: &ReportBundle, header: &Format) -> Result<(), XlsxError> {
    let matrix = &bundle.branch_matrix;

    sheet.write_string_with_format(0, 0, COL_BRANCH, header)?;
    sheet.set_column_width(0, 32)?;
    for (idx, category) in matrix.columns.iter().enumerate() {
        sheet.write_string_with_format(0, idx as u16 + 1, category.label(), header)?;
    }

    for (idx, row) in matrix.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, row.branch.label())?;
        for (col, n) in row.counts.iter().enumerate() {
            sheet.write_number(r, col as u16 + 1, *n as f64)?;
        }
    }

    Ok(())
}

fn write_category_sheet(sheet: &mut Worksheet, bundle: &ReportBundle, header: &Format) -> Result<(), XlsxError> {
    sheet.write_string_with_format(0, 0, COL_ACTIVITY, header)?;
    sheet.write_string_with_format(0, 1, "count", header)?;

    for (idx, (category, n)) in bundle.category_counts.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, category.label())?;
        sheet.write_number(r, 1, *n as f64)?;
    }

    Ok(())
}

fn write_trend_sheet(sheet: &mut Worksheet, bundle: &ReportBundle, header: &Format) -> Result<(), XlsxError> {
    sheet.write_string_with_format(0, 0, COL_EFFECTIVE_DATE, header)?;
    sheet.write_string_with_format(0, 1, "count", header)?;

    for (idx, (month, n)) in bundle.monthly_trend.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, month.to_string())?;
        sheet.write_number(r, 1, *n as f64)?;
    }

    Ok(())
}

fn fmt_timestamp(dt: Option<&NaiveDateTime>) -> String {
    dt.map(|d| d.format(TIMESTAMP_FMT).to_string()).unwrap_or_default()
}
