//! Anthropic API generation provider.
//!
//! Makes a single non-streaming call to the Anthropic Messages API and
//! returns the concatenated text blocks.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::models::ProviderConfig;
use crate::domain::ports::{
    GenerationProvider, GenerationRequest, GenerationResponse, PromptRole, ProviderError,
    StopReason, TokenUsage,
};

/// Configuration for the Anthropic API provider.
#[derive(Debug, Clone)]
pub struct AnthropicApiConfig {
    /// API key (read from ANTHROPIC_API_KEY if not set).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Default model to use.
    pub default_model: String,
    /// API version header.
    pub api_version: String,
    /// HTTP client timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnthropicApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            default_model: "claude-3-5-sonnet-20240620".to_string(),
            api_version: "2023-06-01".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AnthropicApiConfig {
    /// Build from the provider section of the app config.
    pub fn from_provider_config(config: &ProviderConfig, timeout_secs: u64) -> Self {
        Self {
            api_key: config.resolve_api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_model: config.model.clone(),
            api_version: config.api_version.clone(),
            timeout_secs,
        }
    }

    /// Get API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

/// Content block in a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: PromptRole,
    pub content: String,
}

/// Request to the Anthropic Messages API.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

/// Usage information from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// Anthropic API provider.
pub struct AnthropicProvider {
    config: AnthropicApiConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicApiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    pub fn with_defaults() -> Result<Self, ProviderError> {
        Self::new(AnthropicApiConfig::default())
    }

    /// Build the Messages API request body.
    fn build_request(&self, request: &GenerationRequest) -> MessagesRequest {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());

        MessagesRequest {
            model,
            max_tokens: request.max_tokens,
            messages: vec![Message {
                role: request.role,
                content: request.prompt.clone(),
            }],
        }
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.timeout_secs)
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl GenerationProvider for AnthropicProvider {
    fn provider_id(&self) -> &str {
        "anthropic-api"
    }

    fn is_configured(&self) -> bool {
        self.config.get_api_key().is_some()
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| ProviderError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;

        let body = self.build_request(&request);
        debug!(model = %body.model, max_tokens = body.max_tokens, "sending generation request");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", &api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| {
                ProviderError::MalformedResponse(format!("Failed to parse response: {e}"))
            })?;

        let text = result
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "API returned no text content".to_string(),
            ));
        }

        Ok(GenerationResponse {
            text,
            model: result.model,
            stop_reason: StopReason::from_api(result.stop_reason.as_deref()),
            usage: result.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}
