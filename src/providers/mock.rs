/*!
 * Mock provider implementations for testing.
 *
 * - `MockProvider::identity()` - Returns the input unchanged
 * - `MockProvider::working()` - Prefixes the input with a target-language tag
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::fail_on_call(n)` - Fails only on the n-th call (1-based)
 * - `MockProvider::fail_on_text(s)` - Fails when the input contains `s`
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Request as seen by the mock, for custom generators and inspection
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the text unchanged
    Identity,
    /// Returns `[<target>] <text>`
    Working,
    /// Always fails with an error
    Failing,
    /// Fails on the given call number (1-based), succeeds otherwise
    FailOnCall { call: usize },
    /// Fails whenever the text contains the needle
    FailOnText { needle: String },
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Shared request counter
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    pub fn fail_on_text(needle: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailOnText { needle: needle.into() })
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator used for successful calls
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls made so far (shared between clones)
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of all requests received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, request: &MockRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => match self.behavior {
                MockBehavior::Working => format!("[{}] {}", request.target_language, request.text),
                _ => request.text.clone(),
            },
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        let request = MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };
        self.requests.lock().push(request.clone());

        match &self.behavior {
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::FailOnCall { call: failing_call } if *failing_call == call => {
                Err(ProviderError::ApiError {
                    status_code: 503,
                    message: format!("Simulated failure (request #{})", call),
                })
            }
            MockBehavior::FailOnText { needle } if text.contains(needle.as_str()) => {
                Err(ProviderError::RequestFailed(format!("Simulated failure for '{}'", needle)))
            }
            MockBehavior::Empty => Ok(String::new()),
            _ => Ok(self.respond(&request)),
        }
    }
}
