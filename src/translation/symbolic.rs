//! Detection of cells with nothing worth translating

use once_cell::sync::Lazy;
use regex::Regex;

use super::placeholders::PLACEHOLDER_REGEX;
use crate::table::CellValue;

static NON_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w]").expect("Invalid non-word regex")
});

/// True when the text is only placeholders, punctuation and whitespace
pub fn is_symbolic_text(text: &str) -> bool {
    let without_placeholders = PLACEHOLDER_REGEX.replace_all(text, "");
    let cleaned = NON_WORD_REGEX.replace_all(&without_placeholders, "");
    cleaned.trim().is_empty()
}

/// True for non-text cells and for text that is symbolic-only
pub fn is_symbolic_only(value: &CellValue) -> bool {
    match value.as_text() {
        Some(text) => is_symbolic_text(text),
        None => true,
    }
}
