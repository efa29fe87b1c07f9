/*!
 * Tests for the table model and workbook/CSV I/O
 */

use anyhow::Result;
use sheet_translate::errors::TableError;
use sheet_translate::table::{self, CellValue, Table, TableFormat};
use crate::common;

/// Test format detection from file extensions
#[test]
fn test_tableFormat_fromPath_shouldDetectByExtension() {
    assert_eq!(TableFormat::from_path("q.xlsx").unwrap(), TableFormat::Workbook);
    assert_eq!(TableFormat::from_path("Q.XLS").unwrap(), TableFormat::Workbook);
    assert_eq!(TableFormat::from_path("q.ods").unwrap(), TableFormat::Workbook);
    assert_eq!(TableFormat::from_path("q.csv").unwrap(), TableFormat::Csv);
    assert!(matches!(TableFormat::from_path("q.txt"), Err(TableError::UnsupportedFormat(_))));
    assert!(TableFormat::from_path("noext").is_err());
}

/// Test column lookup rules
#[test]
fn test_columnIndex_withCaseAndWhitespace_shouldFallBackToLooseMatch() {
    let table = Table::new("S", vec!["Id".to_string(), " question ".to_string(), "Question".to_string()]);

    // Exact match wins over the loose one
    assert_eq!(table.column_index("Question"), Some(2));
    assert_eq!(table.column_index("QUESTION "), Some(1));
    assert_eq!(table.column_index("Answer"), None);
}

/// Test that workbooks keep their shape and untouched columns
#[test]
fn test_workbook_writeThenRead_shouldPreserveShape() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_question_workbook(
        temp_dir.path(),
        "questions.xlsx",
        &["Hello {name}!", "{id}", "Good morning"],
    )?;

    let (table, format) = table::read_table(&path, None)?;

    assert_eq!(format, TableFormat::Workbook);
    assert_eq!(table.headers, vec!["Id", "Question"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[0][0], CellValue::Number(1.0));
    assert_eq!(table.rows[2][1], CellValue::text("Good morning"));
    Ok(())
}

/// Test selecting a named worksheet
#[test]
fn test_readTable_withUnknownSheet_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_question_workbook(temp_dir.path(), "questions.xlsx", &["Hi"])?;

    let (table, _) = table::read_table(&path, Some("Sheet1"))?;
    assert_eq!(table.sheet_name, "Sheet1");

    let result = table::read_table(&path, Some("Answers"));
    assert!(matches!(result, Err(TableError::SheetNotFound(name)) if name == "Answers"));
    Ok(())
}

/// Test CSV reading with quoted fields and numbers
#[test]
fn test_csv_read_withQuotedFields_shouldClassifyCells() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "questions.csv",
        "Id,Question,Score\n1,\"Hello, {name}\",4.5\n2,,\n",
    )?;

    let (table, format) = table::read_table(&path, None)?;

    assert_eq!(format, TableFormat::Csv);
    assert_eq!(table.rows[0][1], CellValue::text("Hello, {name}"));
    assert_eq!(table.rows[0][2], CellValue::Other("4.5".to_string()));
    assert_eq!(table.rows[1][1], CellValue::Empty);
    Ok(())
}

/// Test that a missing input is an open error
#[test]
fn test_readTable_withMissingFile_shouldReturnOpenError() {
    let result = table::read_table("does_not_exist.xlsx", None);
    assert!(matches!(result, Err(TableError::Open { .. })));
}
