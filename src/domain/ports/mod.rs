//! Port trait definitions (Hexagonal Architecture)
//!
//! - GenerationProvider: text generation backend used by the breakdown
//!   orchestrator

pub mod generation_provider;

pub use generation_provider::{
    GenerationProvider, GenerationRequest, GenerationResponse, PromptRole, ProviderError,
    StopReason, TokenUsage,
};
