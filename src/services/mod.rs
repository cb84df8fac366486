//! Breakdown pipeline services.
//!
//! Leaf to root: [`TemplateCatalog`], [`PromptBuilder`], [`ResponseParser`],
//! [`BreakdownService`].

pub mod breakdown_service;
pub mod prompt_builder;
pub mod response_parser;
pub mod template_catalog;

pub use breakdown_service::{normalize_order, BreakdownOutcome, BreakdownService, BreakdownSettings};
pub use prompt_builder::PromptBuilder;
pub use response_parser::{ParseTier, ResponseParser};
pub use template_catalog::TemplateCatalog;
