//! MangaDex API client implementation.
//!
//! This module provides a rate-limited client for the MangaDex REST API
//! and the typed response schemas it decodes into.

pub mod client;
pub mod rate_limiter;
pub mod types;

pub use client::{ApiError, MangaDexClient};
pub use rate_limiter::{RateBudget, RateLimiter};
pub use types::*;
