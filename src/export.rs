// 📤 Presentation Adapter - Store → table → CSV
//
// Column set is the union across all rows, in first-seen order.
// Cells a record doesn't have become "" here, never at the Record level.

use crate::record::Row;
use crate::store::RecordStore;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

pub const EXPORT_FILE_NAME: &str = "employees.csv";
pub const EXPORT_MIME: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ============================================================================
// TABLE
// ============================================================================

/// Normalized, row-oriented view of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell at (`row`, `column`); `None` if either doesn't exist
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Build the table from the store, in store order
pub fn to_table(store: &RecordStore) -> Table {
    let rows: Vec<Row> = store.all().iter().map(|r| r.to_row()).collect();

    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        for column in row.columns() {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
    }

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(cell_text).unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .collect();

    Table { columns, rows }
}

/// Serialize as comma-separated UTF-8 text: header row, then one line per record.
///
/// An empty table has no columns, so it exports as empty text.
pub fn to_export_text(table: &Table) -> Result<String, ExportError> {
    if table.columns.is_empty() {
        return Ok(String::new());
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }

    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Read exported text back into a table
pub fn parse_export_text(text: &str) -> Result<Table, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { columns, rows })
}

/// Write the current store to `path` as CSV
pub fn write_export(store: &RecordStore, path: &Path) -> anyhow::Result<usize> {
    let table = to_table(store);
    let text = to_export_text(&table).context("Failed to serialize export")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(table.len())
}

// ============================================================================
// TESTS
// ============================================================================
