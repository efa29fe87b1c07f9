//! CSV import/export

use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

use super::{CellValue, Table};
use crate::errors::TableError;

/// Sheet name given to tables loaded from CSV
const CSV_SHEET_NAME: &str = "Sheet1";

/// Classify a raw CSV field.
///
/// Numeric fields are kept verbatim as `Other` so they are neither translated
/// nor reformatted on output. Words like `NaN` or `Infinity` stay text.
pub fn classify_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else if is_numeric(field) {
        CellValue::Other(field.to_string())
    } else {
        CellValue::Text(field.to_string())
    }
}

fn is_numeric(field: &str) -> bool {
    let trimmed = field.trim();
    trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed.parse::<f64>().is_ok_and(|number| number.is_finite())
}

/// Read a CSV file with a header row
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table, TableError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TableError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(CSV_SHEET_NAME, headers);

    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(classify_field).collect());
    }

    Ok(table)
}

/// Write a table as CSV with a header row
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), TableError> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path.as_ref())?;

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
