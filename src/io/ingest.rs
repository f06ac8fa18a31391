//! CSV ingest.
//!
//! Turns an exported article list into a raw string table. Schema checks and
//! row cleaning live in the pipeline; this module only deals with the file
//! format:
//!
//! - UTF-8 with or without a BOM on the first header
//! - ragged rows (short rows are padded with empty cells)
//! - a record that cannot be decoded (e.g. a GBK export) fails the whole
//!   read with its line number; nothing is silently dropped

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::{AppError, EXIT_INPUT};

/// Header row plus every data row, cells aligned with `headers`.
#[derive(Debug, Clone, Default)]
pub struct ArticleTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ArticleTable {
    /// Build a table from in-memory cells. Rows are padded/truncated to the
    /// header width.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| {
                let h: String = h.into();
                normalize_header_name(&h)
            })
            .collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Self { headers, rows }
    }

    /// Column name -> index. On duplicate names the first column wins.
    pub fn header_map(&self) -> HashMap<&str, usize> {
        let mut map = HashMap::with_capacity(self.headers.len());
        for (idx, name) in self.headers.iter().enumerate() {
            map.entry(name.as_str()).or_insert(idx);
        }
        map
    }
}

/// Open and read an article CSV.
pub fn load_article_table(path: &Path) -> Result<ArticleTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let table = read_article_table(file)?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded article table"
    );
    Ok(table)
}

/// Read an article CSV from any reader.
pub fn read_article_table<R: Read>(reader: R) -> Result<ArticleTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    let width = headers.len();
    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; lines are 1-based. Quoted
        // multi-line cells shift this, so prefer the reader's own position.
        let record = result.map_err(|e| {
            let line = e.position().map_or(idx as u64 + 2, |p| p.line());
            AppError::new(
                EXIT_INPUT,
                format!("Failed to read CSV record at line {line}: {e} (is the file saved as UTF-8?)"),
            )
        })?;
        rows.push(record_cells(&record, width));
    }

    Ok(ArticleTable { headers, rows })
}

fn record_cells(record: &StringRecord, width: usize) -> Vec<String> {
    let mut cells: Vec<String> = record.iter().take(width).map(str::to_string).collect();
    cells.resize(width, String::new());
    cells
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a BOM; without
    // stripping it `标题` would be reported missing.
    name.trim_start_matches('\u{feff}').trim().to_string()
}
