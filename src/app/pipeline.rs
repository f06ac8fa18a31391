//! Shared analysis pipeline used by the CLI front-end and the tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! schema check -> row cleaning -> enrichment -> window filter -> aggregation
//!
//! The CLI can then focus on presentation and file locations.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::classify::{assign_branch, classify_activity, extract_date, parse_timestamp};
use crate::domain::{
    AnalyzeConfig, ArticleRecord, COL_AUTHOR, COL_LINK, COL_PUBLISH_TIME, COL_SUMMARY, COL_TITLE, DateWindow,
    EnrichedRecord, REQUIRED_COLUMNS, ReportBundle, RunStats,
};
use crate::error::{AppError, SchemaError};
use crate::io::ingest::{ArticleTable, load_article_table};
use crate::io::{write_report_xlsx, write_summary_json};
use crate::report::{branch_matrix, category_counts, monthly_trend};

/// All outputs of a single file-to-file run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub bundle: ReportBundle,
    pub output_path: PathBuf,
}

/// Read the input CSV, analyze it, and write the XLSX report (plus the
/// optional JSON export).
///
/// A failed run leaves no output behind: nothing is written when reading or
/// validation fails, and the JSON export is removed again when the workbook
/// cannot be written.
pub fn analyze_file(config: &AnalyzeConfig) -> Result<RunOutput, AppError> {
    let table = load_article_table(&config.input)?;
    let bundle = run(&table, config.window)?;

    // The JSON export goes first so that its failure never strands a report.
    if let Some(path) = &config.export_json {
        write_summary_json(path, &bundle)?;
        info!(path = %path.display(), "summary exported");
    }

    if let Err(err) = write_report_xlsx(&config.output, &bundle) {
        if let Some(path) = &config.export_json {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove summary after failed report");
            }
        }
        return Err(err);
    }
    info!(path = %config.output.display(), rows = bundle.records.len(), "report written");

    Ok(RunOutput {
        bundle,
        output_path: config.output.clone(),
    })
}

/// Analyze an in-memory table.
pub fn run(table: &ArticleTable, window: DateWindow) -> Result<ReportBundle, SchemaError> {
    validate_schema(table)?;

    let mut stats = RunStats {
        rows_read: table.rows.len(),
        ..RunStats::default()
    };

    let articles = clean_rows(table);
    stats.rows_without_title = table.rows.len() - articles.len();

    let mut records = Vec::with_capacity(articles.len());
    for article in articles {
        let enriched = enrich(article);
        match enriched.effective_date.map(|dt| window.contains(&dt)) {
            None => stats.rows_without_date += 1,
            Some(false) => stats.rows_outside_window += 1,
            Some(true) => records.push(enriched),
        }
    }
    stats.rows_used = records.len();

    info!(
        read = stats.rows_read,
        no_title = stats.rows_without_title,
        no_date = stats.rows_without_date,
        outside_window = stats.rows_outside_window,
        used = stats.rows_used,
        "articles classified"
    );

    Ok(ReportBundle {
        headers: table.headers.clone(),
        branch_matrix: branch_matrix(&records),
        category_counts: category_counts(&records),
        monthly_trend: monthly_trend(&records),
        records,
        window,
        stats,
    })
}

/// Fail with the full required list when any required column is absent.
pub fn validate_schema(table: &ArticleTable) -> Result<(), SchemaError> {
    let header_map = table.header_map();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !header_map.contains_key(*col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}

/// Turn raw rows into articles, dropping rows without a title.
///
/// Assumes the schema has been validated.
fn clean_rows(table: &ArticleTable) -> Vec<ArticleRecord> {
    let header_map = table.header_map();
    let idx = |name: &str| header_map.get(name).copied();
    let (title_idx, summary_idx, time_idx, author_idx, link_idx) = (
        idx(COL_TITLE),
        idx(COL_SUMMARY),
        idx(COL_PUBLISH_TIME),
        idx(COL_AUTHOR),
        idx(COL_LINK),
    );

    let mut out = Vec::with_capacity(table.rows.len());
    for (line, row) in table.rows.iter().enumerate() {
        let Some(title) = cell(row, title_idx) else {
            debug!(row = line + 1, "dropping row without title");
            continue;
        };
        out.push(ArticleRecord {
            title: title.to_string(),
            summary: cell(row, summary_idx).map(str::to_string),
            publish_time: cell(row, time_idx).map(str::to_string),
            source_account: cell(row, author_idx).map(str::to_string),
            link: cell(row, link_idx).map(str::to_string),
            raw: row.clone(),
        });
    }
    out
}

/// Blank cells count as missing.
fn cell(row: &[String], idx: Option<usize>) -> Option<&str> {
    let value = row.get(idx?)?;
    if value.trim().is_empty() { None } else { Some(value.as_str()) }
}

/// Derive activity, effective date and branch for one article.
pub fn enrich(article: ArticleRecord) -> EnrichedRecord {
    let title = Some(article.title.as_str());
    let summary = article.summary.as_deref();

    let published_at = article.publish_time.as_deref().and_then(parse_timestamp);
    let activity = classify_activity(title, summary);
    let effective_date = extract_date(article.publish_time.as_deref(), summary);
    let branch = assign_branch(title, summary, article.source_account.as_deref());

    EnrichedRecord {
        article,
        published_at,
        activity,
        effective_date,
        branch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{ActivityCategory, Branch};

    const HEADERS: [&str; 6] = ["标题", "摘要", "发布时间", "作者", "文章链接", "阅读数"];

    fn table(rows: Vec<[&str; 6]>) -> ArticleTable {
        ArticleTable::from_rows(HEADERS, rows)
    }

    #[test]
    fn missing_link_column_fails_before_rows_are_read() {
        let t = ArticleTable::from_rows(["标题", "摘要", "发布时间", "作者"], vec![["x", "y", "z", "w"]]);
        let err = run(&t, DateWindow::default()).unwrap_err();
        assert_eq!(err.missing, vec!["文章链接".to_string()]);
        assert_eq!(err.required(), &REQUIRED_COLUMNS);
        for col in REQUIRED_COLUMNS {
            assert!(err.to_string().contains(col));
        }
    }

    #[test]
    fn rows_without_title_are_dropped() {
        let t = table(vec![
            ["", "2024年3月", "", "", "", ""],
            ["   ", "2024年3月", "", "", "", ""],
            ["返校日", "2024年3月", "", "", "", ""],
        ]);
        let bundle = run(&t, DateWindow::default()).unwrap();
        assert_eq!(bundle.stats.rows_read, 3);
        assert_eq!(bundle.stats.rows_without_title, 2);
        assert_eq!(bundle.records.len(), 1);
    }

    #[test]
    fn unparseable_publish_time_keeps_row() {
        let t = table(vec![["校友年会", "2024年1月举行", "上周", "某公众号", "http://a", "10"]]);
        let bundle = run(&t, DateWindow::default()).unwrap();
        assert_eq!(bundle.records.len(), 1);
        let r = &bundle.records[0];
        assert_eq!(r.published_at, None);
        assert_eq!(
            r.effective_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn window_filter_is_inclusive_and_drops_missing_dates() {
        let t = table(vec![
            ["a", "", "2023-01-01", "", "", ""],
            ["b", "", "2025-10-31 18:30:00", "", "", ""],
            ["c", "", "2025-11-01", "", "", ""],
            ["d", "", "", "", "", ""],
            ["e", "", "2022-12-31", "", "", ""],
        ]);
        let bundle = run(&t, DateWindow::default()).unwrap();
        let titles: Vec<_> = bundle.records.iter().map(|r| r.article.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(bundle.stats.rows_without_date, 1);
        assert_eq!(bundle.stats.rows_outside_window, 2);
        assert_eq!(bundle.stats.rows_used, 2);
    }

    #[test]
    fn three_row_dataset_aggregates_match_hand_computed_tables() {
        let t = table(vec![
            ["广东校友春茗", "2024年2月", "2024-02-20", "光华EMBA广东校友会", "l1", "1"],
            ["华东论坛", "", "2024-02-05 09:00:00", "北大光华华东校友会", "l2", "2"],
            ["走进园区", "2024-05 参访", "2024-06-01", "北大光华校友会", "l3", "3"],
        ]);
        let bundle = run(&t, DateWindow::default()).unwrap();

        let got: Vec<_> = bundle.records.iter().map(|r| (r.activity, r.branch)).collect();
        assert_eq!(
            got,
            vec![
                (ActivityCategory::Networking, Branch::Guangdong),
                (ActivityCategory::Forum, Branch::EastChina),
                (ActivityCategory::CorporateVisit, Branch::Headquarters),
            ]
        );

        let m = &bundle.branch_matrix;
        let branches: Vec<_> = m.rows.iter().map(|r| r.branch).collect();
        assert_eq!(branches, vec![Branch::Guangdong, Branch::EastChina, Branch::Headquarters]);
        assert_eq!(m.rows[0].counts, vec![1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(m.rows[1].counts, vec![0, 0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(m.rows[2].counts, vec![0, 1, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(
            bundle.category_counts,
            vec![
                (ActivityCategory::Networking, 1),
                (ActivityCategory::Forum, 1),
                (ActivityCategory::CorporateVisit, 1),
            ]
        );

        let trend: Vec<_> = bundle.monthly_trend.iter().map(|(ym, n)| (ym.to_string(), *n)).collect();
        assert_eq!(trend, vec![("2024-02".to_string(), 2), ("2024-05".to_string(), 1)]);
    }

    #[test]
    fn extra_columns_pass_through() {
        let t = table(vec![["年会", "", "2024-01-01", "", "", "999"]]);
        let bundle = run(&t, DateWindow::default()).unwrap();
        assert_eq!(bundle.headers[5], "阅读数");
        assert_eq!(bundle.records[0].article.raw[5], "999");
    }
}
