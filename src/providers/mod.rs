/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Google: public Google Translate web endpoint (no key)
 * - Ollama: Local LLM server
 * - Anthropic: Anthropic API integration
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::language_utils;

/// Common trait for all translation providers
///
/// A provider turns one piece of text into its translation. It makes a single
/// attempt per call; failures are surfaced to the caller unchanged.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `text` - Text to translate, with placeholders already replaced by markers
    /// * `source_language` - Source language code
    /// * `target_language` - Target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

/// Fill the `{source_language}` / `{target_language}` slots of a prompt template
pub fn render_system_prompt(template: &str, source_language: &str, target_language: &str) -> String {
    template
        .replace("{source_language}", &language_utils::display_name(source_language))
        .replace("{target_language}", &language_utils::display_name(target_language))
}

pub mod anthropic;
pub mod google;
pub mod mock;
pub mod ollama;
