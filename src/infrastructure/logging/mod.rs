//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - pretty or JSON console output on stderr
//! - optional rolling JSON log files
//! - secret scrubbing for provider error text

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
