/*!
 * Per-cell translation.
 *
 * A cell is either left alone (symbolic-only), translated with its
 * placeholders protected, or kept as it was when the provider fails.
 * Failures never escape this module; they are reported in the outcome.
 */

use log::{error, warn};
use std::sync::Arc;

use super::core::TranslationService;
use super::placeholders::PlaceholderSet;
use super::symbolic::is_symbolic_only;
use crate::table::CellValue;

/// What happened to one cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    /// Nothing to translate; the value is copied unchanged
    Skipped(CellValue),

    /// Translated text with placeholders restored
    Translated {
        value: CellValue,
        /// Placeholder indices the provider dropped
        missing_markers: Vec<usize>,
    },

    /// The provider failed; the original value is kept
    Failed {
        original: CellValue,
        reason: String,
    },
}

impl CellOutcome {
    /// Value to write into the output table
    pub fn value(&self) -> &CellValue {
        match self {
            CellOutcome::Skipped(value) => value,
            CellOutcome::Translated { value, .. } => value,
            CellOutcome::Failed { original, .. } => original,
        }
    }

    pub fn into_value(self) -> CellValue {
        match self {
            CellOutcome::Skipped(value) => value,
            CellOutcome::Translated { value, .. } => value,
            CellOutcome::Failed { original, .. } => original,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CellOutcome::Failed { .. })
    }
}

/// Translates single cell values between a fixed pair of languages
#[derive(Debug, Clone)]
pub struct CellTranslator {
    service: Arc<TranslationService>,
    source_language: String,
    target_language: String,
}

impl CellTranslator {
    pub fn new(
        service: Arc<TranslationService>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            service,
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Underlying service, for call and cache statistics
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate one cell value
    pub async fn translate_cell(&self, value: &CellValue) -> CellOutcome {
        let text = match value.as_text() {
            Some(text) if !is_symbolic_only(value) => text,
            _ => return CellOutcome::Skipped(value.clone()),
        };

        let placeholders = PlaceholderSet::extract(text);
        let result = self
            .service
            .translate_text(placeholders.marked_text(), &self.source_language, &self.target_language)
            .await;

        match result {
            Ok(translated) => {
                let restoration = placeholders.restore(&translated);
                if !restoration.is_complete() {
                    warn!(
                        "Translation of '{}' lost placeholder(s) {:?}",
                        text,
                        restoration
                            .missing
                            .iter()
                            .map(|index| placeholders.tokens()[*index].as_str())
                            .collect::<Vec<_>>()
                    );
                }
                CellOutcome::Translated {
                    value: CellValue::Text(restoration.text),
                    missing_markers: restoration.missing,
                }
            }
            Err(e) => {
                error!("Error translating '{}': {}", text, e);
                CellOutcome::Failed {
                    original: value.clone(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
