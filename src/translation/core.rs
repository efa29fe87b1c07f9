/*!
 * Core translation service implementation.
 *
 * `TranslationService` owns the configured provider and adds what every
 * backend shares: an in-run cache, pacing between provider calls and call
 * accounting.
 */

use log::{debug, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::app_config::{TranslationCommonConfig, TranslationConfig, TranslationProvider};
use crate::errors::{AppError, TranslationError};
use crate::providers::Provider;
use crate::providers::anthropic::Anthropic;
use crate::providers::google::GoogleTranslate;
use crate::providers::ollama::Ollama;
use super::cache::{CacheStats, TranslationCache};

/// Main translation service for cell text
#[derive(Debug)]
pub struct TranslationService {
    /// Backend doing the actual translation
    provider: Box<dyn Provider>,

    /// Translation cache for storing and retrieving translations
    cache: TranslationCache,

    /// Pause inserted before every provider call but the first
    rate_limit_delay: Duration,

    /// Number of requests sent to the provider
    provider_calls: AtomicUsize,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: &TranslationConfig) -> Result<Self, AppError> {
        let provider = build_provider(config)?;
        info!(
            "Using {} provider{}",
            config.provider.display_name(),
            match config.get_model() {
                model if model.is_empty() => String::new(),
                model => format!(" with model {}", model),
            }
        );

        Ok(Self::with_provider(provider, &config.common))
    }

    /// Create a service around an already built provider
    pub fn with_provider(provider: Box<dyn Provider>, common: &TranslationCommonConfig) -> Self {
        Self {
            provider,
            cache: TranslationCache::new(common.cache_enabled),
            rate_limit_delay: Duration::from_millis(common.rate_limit_delay_ms),
            provider_calls: AtomicUsize::new(0),
        }
    }

    /// Name of the active provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate one piece of text.
    ///
    /// Blank input is returned as is without a provider call. Cached
    /// translations are reused; failures are never cached.
    pub async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        if let Some(cached) = self.cache.get(text, source_language, target_language) {
            return Ok(cached);
        }

        let previous_calls = self.provider_calls.fetch_add(1, Ordering::SeqCst);
        if previous_calls > 0 && !self.rate_limit_delay.is_zero() {
            tokio::time::sleep(self.rate_limit_delay).await;
        }

        debug!("Request #{} to {}", previous_calls + 1, self.provider.name());
        let translated = self
            .provider
            .translate(text, source_language, target_language)
            .await?;

        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        self.cache.store(text, source_language, target_language, &translated);
        Ok(translated)
    }

    /// Number of requests sent to the provider so far
    pub fn provider_calls(&self) -> usize {
        self.provider_calls.load(Ordering::SeqCst)
    }

    /// Cache hit and miss counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Build the provider selected in the configuration
fn build_provider(config: &TranslationConfig) -> Result<Box<dyn Provider>, AppError> {
    let endpoint = config.get_endpoint();
    let timeout_secs = config.get_timeout_secs();
    let common = &config.common;

    let provider: Box<dyn Provider> = match config.provider {
        TranslationProvider::Google => Box::new(GoogleTranslate::new(endpoint, timeout_secs)),
        TranslationProvider::Ollama => Box::new(Ollama::new_with_config(
            &endpoint,
            config.get_model(),
            timeout_secs,
            common.system_prompt.clone(),
            common.temperature,
        )?),
        TranslationProvider::Anthropic => {
            let api_key = config.get_api_key();
            if api_key.is_empty() {
                return Err(AppError::Config("Anthropic provider requires an API key".to_string()));
            }
            Box::new(Anthropic::new_with_config(
                api_key,
                endpoint,
                config.get_model(),
                timeout_secs,
                common.system_prompt.clone(),
                common.temperature,
            ))
        }
    };

    Ok(provider)
}
