/*!
 * # sheet-translate
 *
 * Translate one column of a spreadsheet while keeping `{placeholder}` tokens
 * intact, and write the result to a new timestamped file.
 *
 * ## Features
 *
 * - Read `.xlsx`/`.xlsm`/`.xlsb`/`.xls`/`.ods` workbooks and `.csv` files
 * - Translate the designated column cell by cell using:
 *   - Google Translate (default, no key)
 *   - Ollama (local LLM)
 *   - Anthropic API
 * - Protect placeholder tokens with positional markers
 * - Skip cells with nothing to translate
 * - Keep the original value of cells whose translation failed
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `table`: Table model and workbook/CSV I/O
 * - `translation`: Placeholder handling, caching and the translation service
 * - `providers`: Client implementations for the translation backends
 * - `app_controller`: Read, translate, write workflow
 * - `file_utils`: Output naming and file system helpers
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod table;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{CellFailure, Controller, RunReport};
pub use errors::{AppError, ProviderError, TableError, TranslationError};
pub use language_utils::{get_language_name, normalize_to_part2t};
pub use table::{CellValue, Table, TableFormat};
pub use translation::{CellOutcome, CellTranslator, PlaceholderSet, TranslationService};
