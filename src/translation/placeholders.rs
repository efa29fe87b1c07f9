/*!
 * Placeholder protection for translated text.
 *
 * Curly-brace tokens such as `{user_name}` must come back from the provider
 * untouched. Before translation every token occurrence is swapped for a
 * positional marker (`<<0>>`, `<<1>>`, ...); afterwards the markers are
 * swapped back for the original tokens.
 *
 * Each occurrence gets its own marker, including repeated tokens, so
 * `"{a} and {a}"` is sent as `"<<0>> and <<1>>"`.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Matches `{` + one or more non-`}` characters + `}`
pub(crate) static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^}]+\}").expect("Invalid placeholder regex")
});

/// Matches `<<n>>`, tolerating whitespace providers like to insert
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<\s*(\d+)\s*>>").expect("Invalid marker regex")
});

/// Marker text for a token index
pub fn marker(index: usize) -> String {
    format!("<<{}>>", index)
}

/// Placeholder tokens of one text and the text with markers in their place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    /// Tokens in order of appearance, duplicates included
    tokens: Vec<String>,
    /// Source text with each token occurrence replaced by its marker
    marked_text: String,
}

/// Result of putting tokens back into translated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restoration {
    /// Translated text with tokens restored
    pub text: String,
    /// Indices of tokens whose marker was not found in the translation
    pub missing: Vec<usize>,
}

impl Restoration {
    /// Whether every token made it back
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl PlaceholderSet {
    /// Extract tokens left to right and build the marker text
    pub fn extract(text: &str) -> Self {
        let mut tokens = Vec::new();
        let marked_text = PLACEHOLDER_REGEX
            .replace_all(text, |caps: &Captures| {
                let index = tokens.len();
                tokens.push(caps[0].to_string());
                marker(index)
            })
            .into_owned();

        if !tokens.is_empty() {
            debug!("Protected {} placeholder(s): {:?}", tokens.len(), tokens);
        }

        Self { tokens, marked_text }
    }

    /// Tokens in extraction order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Text to send to the provider
    pub fn marked_text(&self) -> &str {
        &self.marked_text
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Indices of markers absent from `text`
    pub fn missing_markers(&self, text: &str) -> Vec<usize> {
        let mut seen = vec![false; self.tokens.len()];
        for caps in MARKER_REGEX.captures_iter(text) {
            if let Some(index) = caps[1].parse::<usize>().ok().filter(|i| *i < seen.len()) {
                seen[index] = true;
            }
        }

        seen.iter()
            .enumerate()
            .filter(|(_, found)| !**found)
            .map(|(index, _)| index)
            .collect()
    }

    /// Replace markers in `translated` with the original tokens.
    ///
    /// Runs as a single pass, so token text is never rescanned for markers.
    /// Markers with an unknown index are left as they are; dropped markers
    /// are reported in [`Restoration::missing`].
    pub fn restore(&self, translated: &str) -> Restoration {
        let mut seen = vec![false; self.tokens.len()];

        let text = MARKER_REGEX
            .replace_all(translated, |caps: &Captures| {
                let token = caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.tokens.get(index).map(|token| (index, token)));

                match token {
                    Some((index, token)) => {
                        seen[index] = true;
                        token.clone()
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        let missing: Vec<usize> = seen
            .iter()
            .enumerate()
            .filter(|(_, found)| !**found)
            .map(|(index, _)| index)
            .collect();

        if !missing.is_empty() {
            debug!("Restored {} of {} placeholder marker(s)", self.tokens.len() - missing.len(), self.tokens.len());
        }

        Restoration { text, missing }
    }
}
