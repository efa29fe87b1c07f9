use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::providers::Provider;
use crate::table::{self, Table, TableFormat};
use crate::translation::{CellOutcome, CellTranslator, TranslationService};

// @module: Application controller for spreadsheet translation

/// A cell that kept its original value because translation failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellFailure {
    /// Sheet row number, counting the header as row 1
    pub row: usize,
    /// Value left in the output
    pub original: String,
    /// Why the translation failed
    pub reason: String,
}

/// Result of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// File the translated table was written to
    pub output_path: PathBuf,
    /// Cells visited in the designated column
    pub total_cells: usize,
    /// Cells sent through the provider successfully
    pub translated: usize,
    /// Cells with nothing to translate
    pub skipped: usize,
    /// Cells that kept their original value
    pub failed: usize,
    /// Translated cells with at least one placeholder lost
    pub missing_markers: usize,
    /// Details of every failed cell
    pub failures: Vec<CellFailure>,
    /// Provider requests made (cache hits excluded)
    pub provider_calls: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    /// Whether every cell was translated or legitimately skipped
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.missing_markers == 0
    }

    /// One-line summary for the log
    pub fn summary(&self) -> String {
        let mut summary = if self.failed == 0 {
            format!(
                "Translated {} cell(s), skipped {} of {} in {}",
                self.translated,
                self.skipped,
                self.total_cells,
                format_duration(self.elapsed)
            )
        } else {
            format!(
                "Completed with {} untranslated cell(s): {} translated, {} skipped of {} in {}",
                self.failed,
                self.translated,
                self.skipped,
                self.total_cells,
                format_duration(self.elapsed)
            )
        };

        if self.missing_markers > 0 {
            summary.push_str(&format!(
                "; {} cell(s) lost placeholders",
                self.missing_markers
            ));
        }
        summary
    }
}

/// Failed-cells report written next to the output when configured
#[derive(Debug, Serialize)]
struct FailedCellsReport<'a> {
    input: &'a Path,
    output: &'a Path,
    column: &'a str,
    target_language: &'a str,
    failures: &'a [CellFailure],
}

/// Main application controller for spreadsheet translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Cell translator bound to the configured languages
    translator: CellTranslator,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let service = TranslationService::new(&config.translation)?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an explicit provider
    pub fn with_provider(config: Config, provider: Box<dyn Provider>) -> Self {
        let service = TranslationService::with_provider(provider, &config.translation.common);
        Self::with_service(config, service)
    }

    fn with_service(config: Config, service: TranslationService) -> Self {
        let translator = CellTranslator::new(
            Arc::new(service),
            config.source_language.clone(),
            config.target_language.clone(),
        );
        Self { config, translator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole workflow: read, translate the designated column, write
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let start_time = Instant::now();
        let input_path = &self.config.input_path;

        if !input_path.exists() {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_path)));
        }

        let (mut table, format) = table::read_table(input_path, self.config.sheet_name.as_deref())?;
        info!(
            "Loaded {} row(s) from {:?} (sheet '{}')",
            table.row_count(),
            input_path,
            table.sheet_name
        );

        let column = table
            .column_index(&self.config.designated_column)
            .ok_or_else(|| AppError::MissingColumn {
                column: self.config.designated_column.clone(),
                available: table.headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
            })?;
        debug!("Designated column '{}' is column {}", self.config.designated_column, column);

        let mut report = self.translate_column(&mut table, column).await;

        let output_path = self.write_output(&table, format)?;
        report.output_path = output_path;

        // The table is already written; a report problem must not fail the run
        if let Some(report_path) = &self.config.failed_cells_report {
            if let Err(e) = self.write_failed_report(report_path, &report) {
                warn!("Could not write failed-cells report to {:?}: {}", report_path, e);
            }
        }

        let service = self.translator.service();
        let cache_stats = service.cache_stats();
        report.provider_calls = service.provider_calls();
        report.elapsed = start_time.elapsed();
        info!(
            "{} provider request(s), cache {} hit(s) / {} miss(es) ({:.0}% hit rate)",
            report.provider_calls,
            cache_stats.hits,
            cache_stats.misses,
            cache_stats.hit_rate() * 100.0
        );
        Ok(report)
    }

    /// Translate every cell of `column` in row order, in place
    async fn translate_column(&self, table: &mut Table, column: usize) -> RunReport {
        let values: Vec<_> = table.column_values(column).cloned().collect();

        let progress_bar = ProgressBar::new(values.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cells ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        info!(
            "🚀 {} → {} with {}",
            self.config.source_language,
            self.config.target_language,
            self.translator.service().provider_name()
        );

        let mut report = RunReport {
            output_path: PathBuf::new(),
            total_cells: values.len(),
            translated: 0,
            skipped: 0,
            failed: 0,
            missing_markers: 0,
            failures: Vec::new(),
            provider_calls: 0,
            elapsed: Duration::ZERO,
        };

        for (row, value) in values.iter().enumerate() {
            let outcome = self.translator.translate_cell(value).await;

            match &outcome {
                CellOutcome::Skipped(_) => report.skipped += 1,
                CellOutcome::Translated { missing_markers, .. } => {
                    report.translated += 1;
                    if !missing_markers.is_empty() {
                        report.missing_markers += 1;
                    }
                }
                CellOutcome::Failed { original, reason } => {
                    report.failed += 1;
                    report.failures.push(CellFailure {
                        row: row + 2,
                        original: original.to_string(),
                        reason: reason.clone(),
                    });
                }
            }

            if let Some(cell) = table.cell_mut(row, column) {
                *cell = outcome.into_value();
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        report
    }

    /// Write the table under a fresh, unused output name
    fn write_output(&self, table: &Table, format: TableFormat) -> Result<PathBuf, AppError> {
        FileManager::ensure_dir(&self.config.output_dir)?;

        let candidate = FileManager::generate_output_path(
            &self.config.output_dir,
            &self.config.target_language,
            &Local::now(),
            format.output_extension(),
        );
        let output_path = FileManager::unique_output_path(candidate);

        table::write_table(table, &output_path, format)?;
        info!("Translated table written to {:?}", output_path);
        Ok(output_path)
    }

    fn write_failed_report(&self, path: &Path, report: &RunReport) -> Result<(), AppError> {
        let failed_report = FailedCellsReport {
            input: &self.config.input_path,
            output: &report.output_path,
            column: &self.config.designated_column,
            target_language: &self.config.target_language,
            failures: &report.failures,
        };

        FileManager::write_json(path, &failed_report)?;
        if report.failures.is_empty() {
            debug!("No failed cells; empty report written to {:?}", path);
        } else {
            warn!("{} failed cell(s) listed in {:?}", report.failures.len(), path);
        }
        Ok(())
    }
}

/// Human readable duration, e.g. `1m 5s` or `2.345s`
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
