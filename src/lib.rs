//! goalsplit - macro goal to micro-goal breakdown
//!
//! Turns a user's macro goal into an ordered list of small, time-boxed
//! micro-goals. A generation provider (the Anthropic Messages API) is asked
//! first; when it is unavailable or its answer cannot be parsed, a static
//! template catalog supplies the list instead, so a valid goal always gets a
//! non-empty breakdown.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): goal and micro-goal models, the
//!   `GenerationProvider` port, errors
//! - **Service Layer** (`services`): template catalog, prompt builder,
//!   response parser and the breakdown orchestrator
//! - **Adapters** (`adapters`): generation provider implementations
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use goalsplit::adapters::providers::ProviderRegistry;
//! use goalsplit::domain::models::{Config, GoalDetails, GoalType};
//! use goalsplit::services::{BreakdownService, BreakdownSettings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let provider = ProviderRegistry::from_config(&config)
//!         .create_by_kind(config.provider.kind);
//!     let settings = BreakdownSettings::from_config(&config);
//!     let service = BreakdownService::with_settings(provider, settings);
//!
//!     let goal = GoalDetails::new("Run a 5k").with_goal_type(GoalType::Habit);
//!     for step in service.breakdown(&goal).await? {
//!         println!("{}. {} ({})", step.order, step.title, step.estimated_time);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, EstimatedTime, GoalDetails, GoalDifficulty, GoalPriority, GoalType, MicroGoal,
    MicroGoalDifficulty, MicroGoalPatch, Progress, TimeAvailable,
};
pub use domain::ports::{GenerationProvider, GenerationRequest, GenerationResponse, ProviderError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{BreakdownOutcome, BreakdownService, BreakdownSettings};
