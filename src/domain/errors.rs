//! Domain errors for the goalsplit breakdown pipeline.

use thiserror::Error;

/// Domain-level errors that can occur while breaking a goal down.
///
/// Only `InvalidInput` ever reaches a caller of
/// [`BreakdownService::breakdown`](crate::services::BreakdownService::breakdown).
/// The other variants describe failures that the orchestrator recovers from
/// locally by falling back to the template catalog.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Provider response yielded no micro-goals")]
    UnparsableResponse,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<crate::domain::ports::ProviderError> for DomainError {
    fn from(err: crate::domain::ports::ProviderError) -> Self {
        DomainError::ProviderUnavailable(err.to_string())
    }
}
