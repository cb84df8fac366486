//! Generation provider adapter implementations.

pub mod anthropic_api;
pub mod mock;
pub mod registry;

pub use anthropic_api::{AnthropicApiConfig, AnthropicProvider};
pub use mock::{MockProvider, MockResponse};
pub use registry::ProviderRegistry;
