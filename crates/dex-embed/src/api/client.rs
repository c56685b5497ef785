//! Rate-limited MangaDex API client.

use super::rate_limiter::{RateBudget, RateLimiter};
use super::types::*;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Error from a single API fetch.
///
/// Callers branch on success versus failure only; the variants exist for
/// diagnostics, not for control flow.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The upstream could not be reached at all
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with something other than 200
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },

    /// The body could not be read or did not match the expected schema
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// MangaDex REST API client.
///
/// Every fetch goes through one shared rate limiter; a permit is consumed
/// per call whether or not the call succeeds, and a single failed attempt
/// is a single reported failure (no retries).
pub struct MangaDexClient {
    /// HTTP client
    client: Client,
    /// Base URL for the MangaDex API
    base_url: String,
    /// Shared request-rate limiter
    limiter: RateLimiter,
}

impl MangaDexClient {
    /// Create a new MangaDex client
    pub fn new(base_url: String, budget: RateBudget, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dex-embed/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            limiter: RateLimiter::new(budget),
        })
    }

    /// Make a rate-limited GET request and decode the response
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        self.limiter.acquire().await;

        debug!(url = %url, "Making API request");

        let response = self.client.get(&url).send().await.map_err(|source| {
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    /// Fetch a manga record by id
    pub async fn get_manga(&self, id: &str) -> Result<MangaData, ApiError> {
        let response: EntityResponse<MangaData> = self.get(&format!("/manga/{}", id)).await?;
        Ok(response.data)
    }

    /// Fetch an author record by id
    pub async fn get_author(&self, id: &str) -> Result<AuthorData, ApiError> {
        let response: EntityResponse<AuthorData> = self.get(&format!("/author/{}", id)).await?;
        Ok(response.data)
    }

    /// Fetch a cover art record by id
    pub async fn get_cover(&self, id: &str) -> Result<CoverData, ApiError> {
        let response: EntityResponse<CoverData> = self.get(&format!("/cover/{}", id)).await?;
        Ok(response.data)
    }
}
