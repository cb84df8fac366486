//! Generation provider port
//!
//! The breakdown pipeline treats text generation as an external collaborator:
//! it sends one prompt and gets back either text or an error. Backends:
//! - Anthropic Messages API (`AnthropicProvider`)
//! - Offline / test double (`MockProvider`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role framing for the prompt inside the provider envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    #[default]
    User,
    Assistant,
}

/// Request for a single generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Rendered instruction text
    pub prompt: String,

    /// Result-size ceiling
    pub max_tokens: u32,

    /// Model identifier; `None` lets the provider pick its default
    pub model: Option<String>,

    pub role: PromptRole,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            model: None,
            role: PromptRole::User,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Reason generation stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    Other(String),
}

impl StopReason {
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("end_turn") | None => Self::EndTurn,
            Some("max_tokens") => Self::MaxTokens,
            Some("stop_sequence") => Self::StopSequence,
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Generated text, opaque to the provider
    pub text: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Option<TokenUsage>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            stop_reason: StopReason::EndTurn,
            usage: None,
        }
    }
}

/// Error types for provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Provider call timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Port trait for text generation backends
///
/// Implementations must be `Send + Sync`; a single provider instance is
/// shared by every concurrent breakdown.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Identifier for this provider type, e.g. "anthropic-api"
    fn provider_id(&self) -> &str;

    /// Whether the provider has what it needs (credentials, endpoint) to
    /// attempt a call.
    fn is_configured(&self) -> bool {
        true
    }

    /// Run a single generation.
    ///
    /// # Errors
    /// - `ProviderError::NotConfigured` - missing credentials
    /// - `ProviderError::Network` - transport failure or client-side timeout
    /// - `ProviderError::Api` - non-2xx response
    /// - `ProviderError::MalformedResponse` - envelope without text
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError>;
}
