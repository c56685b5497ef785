//! Shared library for the dex-embed service.
//!
//! This crate provides the ambient concerns used by the server binary:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
