//! Provider registry and factory.

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::{Config, ProviderKind};
use crate::domain::ports::GenerationProvider;

use super::anthropic_api::{AnthropicApiConfig, AnthropicProvider};
use super::mock::MockProvider;

/// Builds the configured generation provider.
pub struct ProviderRegistry {
    anthropic_api_config: AnthropicApiConfig,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            anthropic_api_config: AnthropicApiConfig::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            anthropic_api_config: AnthropicApiConfig::from_provider_config(
                &config.provider,
                config.breakdown.timeout_secs,
            ),
        }
    }

    pub fn with_anthropic_api_config(mut self, config: AnthropicApiConfig) -> Self {
        self.anthropic_api_config = config;
        self
    }

    /// Create a provider by kind.
    ///
    /// If the HTTP client cannot be built the offline provider is returned,
    /// which routes every breakdown to the template catalog.
    pub fn create_by_kind(&self, kind: ProviderKind) -> Arc<dyn GenerationProvider> {
        match kind {
            ProviderKind::Anthropic => {
                match AnthropicProvider::new(self.anthropic_api_config.clone()) {
                    Ok(provider) => {
                        if !provider.is_configured() {
                            warn!("no Anthropic API key configured; breakdowns will use templates");
                        }
                        Arc::new(provider)
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to create Anthropic provider, running offline");
                        Arc::new(MockProvider::offline())
                    }
                }
            }
            ProviderKind::Offline => Arc::new(MockProvider::offline()),
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
