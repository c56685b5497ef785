//! Embed generator for MangaDex titles.
//!
//! This library turns a manga id into a social-media link preview: a
//! rate-limited API client fetches the title record, the resolver folds
//! author and cover lookups into flat preview fields, and the server
//! renders them as an HTML page with OpenGraph tags and a redirect to
//! the canonical title URL.

pub mod api;
pub mod embed;
pub mod render;
pub mod server;

pub use api::{ApiError, MangaDexClient, RateBudget, RateLimiter};
pub use embed::{EmbedResolver, PreviewFields};
