//! Domain layer for the goalsplit breakdown pipeline
//!
//! This module contains the goal and micro-goal models, domain errors and
//! the port traits implemented by adapters.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
