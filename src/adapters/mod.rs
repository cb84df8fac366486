//! Infrastructure adapters for external systems.

pub mod providers;
