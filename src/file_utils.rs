use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

/// Prefix of every translated output file
pub const OUTPUT_PREFIX: &str = "translated_output";

/// Timestamp layout used in output names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: translated_output_<lang>_<YYYYMMDD_HHMMSS>.<extension>
    pub fn generate_output_path<P: AsRef<Path>>(
        output_dir: P,
        target_language: &str,
        timestamp: &DateTime<Local>,
        extension: &str,
    ) -> PathBuf {
        let filename = format!(
            "{}_{}_{}.{}",
            OUTPUT_PREFIX,
            sanitize_component(target_language),
            timestamp.format(TIMESTAMP_FORMAT),
            extension.trim_start_matches('.')
        );
        output_dir.as_ref().join(filename)
    }

    /// First free path among `path`, `stem_1.ext`, `stem_2.ext`, ...
    ///
    /// Two runs in the same second must not overwrite each other.
    pub fn unique_output_path<P: AsRef<Path>>(path: P) -> PathBuf {
        let path = path.as_ref();
        if !path.exists() {
            return path.to_path_buf();
        }

        let stem = path.file_stem().unwrap_or_default().to_string_lossy().to_string();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        (1..)
            .map(|n| path.with_file_name(format!("{}_{}{}", stem, n, extension)))
            .find(|candidate| !candidate.exists())
            .unwrap_or_else(|| path.to_path_buf())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Serialize `value` as pretty JSON into `path`
    pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
        Self::write_to_file(path, &json)
    }
}

/// Keep language codes from smuggling path separators into file names
fn sanitize_component(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
