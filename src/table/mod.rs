/*!
 * In-memory table model for spreadsheet and CSV input.
 *
 * A table is a header row plus data rows of typed cells. Only `Text` cells
 * are ever handed to the translator; every other variant is written back as
 * it was read.
 *
 * - `workbook`: xlsx-family files via calamine (read) and rust_xlsxwriter (write)
 * - `delimited`: CSV files via the csv crate
 */

use std::fmt;
use std::path::Path;

use crate::errors::TableError;

pub mod delimited;
pub mod workbook;

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value
    Empty,
    /// Text, eligible for translation
    Text(String),
    /// Floating point number
    Number(f64),
    /// Integer number
    Int(i64),
    /// Boolean
    Bool(bool),
    /// Date or date-time as an Excel serial number
    DateTime(f64),
    /// Time span as an Excel serial number (fraction of a day)
    Duration(f64),
    /// Anything else (error values, ISO strings, numeric CSV fields),
    /// kept as its textual rendering
    Other(String),
}

impl CellValue {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The text content if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) | Self::Other(text) => write!(f, "{}", text),
            Self::Number(number) | Self::DateTime(number) | Self::Duration(number) => write!(f, "{}", number),
            Self::Int(number) => write!(f, "{}", number),
            Self::Bool(value) => write!(f, "{}", value),
        }
    }
}

/// Supported on-disk table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Excel / OpenDocument workbook
    Workbook,
    /// Comma separated values
    Csv,
}

impl TableFormat {
    /// Detect the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(TableError::UnsupportedFormat(format!("{:?}", path))),
        }
    }

    /// Extension used for translated output
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::Workbook => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Tabular data: one header row and any number of data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Worksheet name, reused when writing workbooks
    pub sheet_name: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new(sheet_name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding it with empty cells to the header width.
    /// A row wider than the headers widens the table.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        if row.len() > self.headers.len() {
            self.headers.resize(row.len(), String::new());
            let width = self.headers.len();
            for existing in &mut self.rows {
                existing.resize(width, CellValue::Empty);
            }
        }
        row.resize(self.headers.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Find a column by header name.
    ///
    /// An exact match wins; otherwise headers are compared trimmed and
    /// case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .or_else(|| {
                let wanted = name.trim().to_lowercase();
                self.headers
                    .iter()
                    .position(|header| header.trim().to_lowercase() == wanted)
            })
    }

    /// Values of one column in row order
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    /// Mutable access to a single cell
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut CellValue> {
        self.rows.get_mut(row).and_then(|cells| cells.get_mut(column))
    }
}

/// Read a table, choosing the reader from the file extension
pub fn read_table<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<(Table, TableFormat), TableError> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;

    let table = match format {
        TableFormat::Workbook => workbook::read_workbook(path, sheet_name)?,
        TableFormat::Csv => delimited::read_csv(path)?,
    };

    Ok((table, format))
}

/// Write a table in the given format
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P, format: TableFormat) -> Result<(), TableError> {
    match format {
        TableFormat::Workbook => workbook::write_workbook(table, path),
        TableFormat::Csv => delimited::write_csv(table, path),
    }
}
