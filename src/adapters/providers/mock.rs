//! Mock generation provider for tests and offline runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::ports::{
    GenerationProvider, GenerationRequest, GenerationResponse, ProviderError,
};

/// Mock response configuration.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Output text
    pub output: String,
    /// Whether to simulate failure
    pub fail: bool,
    /// Error message if failing
    pub error_message: Option<String>,
    /// Simulated latency before answering
    pub delay: Option<Duration>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            output: "[]".to_string(),
            fail: false,
            error_message: None,
            delay: None,
        }
    }
}

impl MockResponse {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            fail: true,
            error_message: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Provider that answers from a fixed [`MockResponse`].
pub struct MockProvider {
    response: MockResponse,
    call_count: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockProvider {
    pub fn with_response(response: MockResponse) -> Self {
        Self {
            response,
            call_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Always returns `output`.
    pub fn responding(output: impl Into<String>) -> Self {
        Self::with_response(MockResponse::success(output))
    }

    /// Always fails with a network error carrying `error`.
    pub fn failing(error: impl Into<String>) -> Self {
        Self::with_response(MockResponse::failure(error))
    }

    /// Provider used when generation is switched off; every call fails so the
    /// template catalog answers.
    pub fn offline() -> Self {
        Self::failing("generation disabled (offline mode)")
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.response.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent request received, if any.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::with_response(MockResponse::default())
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    fn provider_id(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let model = request.model.clone().unwrap_or_else(|| "mock".to_string());
        *self.last_request.lock().unwrap_or_else(PoisonError::into_inner) = Some(request);

        if let Some(delay) = self.response.delay {
            tokio::time::sleep(delay).await;
        }

        if self.response.fail {
            return Err(ProviderError::Network(
                self.response
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Mock failure".to_string()),
            ));
        }

        Ok(GenerationResponse::text(self.response.output.clone(), model))
    }
}
