/*!
 * Common test utilities for the sheet-translate test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use sheet_translate::app_config::Config;
use sheet_translate::table::{self, CellValue, Table, TableFormat};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Table with an `Id` column and a `Question` column holding `questions`
pub fn question_table(questions: &[&str]) -> Table {
    let mut table = Table::new("Sheet1", vec!["Id".to_string(), "Question".to_string()]);
    for (i, question) in questions.iter().enumerate() {
        table.push_row(vec![CellValue::Int(i as i64 + 1), CellValue::text(*question)]);
    }
    table
}

/// Writes a question workbook and returns its path
pub fn create_question_workbook(dir: &Path, filename: &str, questions: &[&str]) -> Result<PathBuf> {
    let path = dir.join(filename);
    table::write_table(&question_table(questions), &path, TableFormat::Workbook)?;
    Ok(path)
}

/// Configuration reading `input` and writing into `output_dir`, English to Malayalam
pub fn test_config(input: &Path, output_dir: &Path) -> Config {
    Config {
        input_path: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        ..Config::default()
    }
}

/// All files in `dir` whose name starts with the output prefix
pub fn output_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().starts_with("translated_output_"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Values of a named column in a written table
pub fn read_column(path: &Path, column: &str) -> Result<Vec<CellValue>> {
    let (table, _) = table::read_table(path, None)?;
    let index = table
        .column_index(column)
        .ok_or_else(|| anyhow::anyhow!("column {} missing in {:?}", column, path))?;
    Ok(table.column_values(index).cloned().collect())
}
