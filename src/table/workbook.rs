//! Workbook import/export: calamine for reading, rust_xlsxwriter for writing

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::debug;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::{CellValue, Table};
use crate::errors::TableError;

/// Excel limits sheet names to 31 characters
const MAX_SHEET_NAME_CHARS: usize = 31;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(text) => CellValue::Text(text.clone()),
            Data::Float(number) => CellValue::Number(*number),
            Data::Int(number) => CellValue::Int(*number),
            Data::Bool(value) => CellValue::Bool(*value),
            Data::DateTime(date) if date.is_duration() => CellValue::Duration(date.as_f64()),
            Data::DateTime(date) => CellValue::DateTime(date.as_f64()),
            other => CellValue::Other(other.to_string()),
        }
    }
}

/// Read one worksheet of a workbook. The first row is the header row.
pub fn read_workbook<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<Table, TableError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| TableError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let sheet = match sheet_name {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(TableError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TableError::EmptySheet(path.display().to_string()))?,
    };

    let range = workbook.worksheet_range(&sheet).map_err(|e| TableError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let table = table_from_range(&sheet, &range)?;
    debug!(
        "Read worksheet '{}' from {:?}: {} columns, {} rows",
        sheet,
        path,
        table.column_count(),
        table.row_count()
    );

    Ok(table)
}

fn table_from_range(sheet: &str, range: &Range<Data>) -> Result<Table, TableError> {
    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| TableError::EmptySheet(sheet.to_string()))?;

    let headers = header_row
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    let mut table = Table::new(sheet, headers);
    for row in rows {
        table.push_row(row.iter().map(CellValue::from).collect());
    }

    Ok(table)
}

/// Write a table to a new xlsx workbook with a single worksheet
pub fn write_workbook<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), TableError> {
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let date_time_format = Format::new().set_num_format(DATE_TIME_FORMAT);
    let duration_format = Format::new().set_num_format(DURATION_FORMAT);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let sheet_name: String = table.sheet_name.chars().take(MAX_SHEET_NAME_CHARS).collect();
    if !sheet_name.is_empty() {
        worksheet.set_name(&sheet_name)?;
    }

    for (col, header) in table.headers.iter().enumerate() {
        if !header.is_empty() {
            worksheet.write_string(0, col as u16, header)?;
        }
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(text) | CellValue::Other(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number(row_num, col, *number)?;
                }
                CellValue::Int(number) => {
                    worksheet.write_number(row_num, col, *number as f64)?;
                }
                CellValue::Bool(value) => {
                    worksheet.write_boolean(row_num, col, *value)?;
                }
                CellValue::DateTime(serial) => {
                    // Whole serials are plain dates
                    let format = if serial.fract() == 0.0 { &date_format } else { &date_time_format };
                    worksheet.write_number_with_format(row_num, col, *serial, format)?;
                }
                CellValue::Duration(serial) => {
                    worksheet.write_number_with_format(row_num, col, *serial, &duration_format)?;
                }
            }
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}
