/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use chrono::{Local, TimeZone};
use std::fs;
use std::path::Path;
use sheet_translate::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.tmp")));

    Ok(())
}

/// Test that generate_output_path follows the output naming scheme
#[test]
fn test_generate_output_path_withTimestamp_shouldFormatName() {
    let timestamp = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();

    let output_path = FileManager::generate_output_path(Path::new("/tmp/out"), "ml", &timestamp, "xlsx");

    assert_eq!(output_path, Path::new("/tmp/out/translated_output_ml_20240307_090502.xlsx"));
}

/// Test that region codes and leading dots are handled
#[test]
fn test_generate_output_path_withRegionCode_shouldKeepCode() {
    let timestamp = Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();

    let output_path = FileManager::generate_output_path(Path::new("."), "zh-CN", &timestamp, ".csv");

    assert_eq!(output_path, Path::new("./translated_output_zh-CN_20251231_235959.csv"));
}

/// Test that existing outputs are never overwritten
#[test]
fn test_unique_output_path_withExistingFiles_shouldAppendCounter() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let candidate = temp_dir.path().join("translated_output_ml_20240307_090502.xlsx");

    assert_eq!(FileManager::unique_output_path(&candidate), candidate);

    fs::write(&candidate, b"first")?;
    let second = FileManager::unique_output_path(&candidate);
    assert_eq!(second, temp_dir.path().join("translated_output_ml_20240307_090502_1.xlsx"));

    fs::write(&second, b"second")?;
    assert_eq!(
        FileManager::unique_output_path(&candidate),
        temp_dir.path().join("translated_output_ml_20240307_090502_2.xlsx")
    );

    Ok(())
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;
    FileManager::ensure_dir(&nested)?;

    assert!(nested.is_dir());
    Ok(())
}

/// Test JSON writing into a directory that does not exist yet
#[test]
fn test_write_json_withMissingParent_shouldCreateAndWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("reports").join("failed.json");

    FileManager::write_json(&path, &vec![("row", 3)])?;

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written[0][0], "row");
    assert_eq!(written[0][1], 3);
    Ok(())
}
