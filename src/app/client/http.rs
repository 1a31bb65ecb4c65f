//! Core HTTP operations with rate limiting and retry logic
//!
//! This module provides the fundamental HTTP request operations with
//! built-in resilience patterns: a client-side rate limiter keeps request
//! rates under the service's documented limits, and transient failures
//! (429, 503, transport errors) retry with exponential backoff.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::constants::limits;
use crate::errors::{FetchError, FetchResult};

/// HTTP operations handler with resilience patterns
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and rate limiting
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if `rate_limit_rps` is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> FetchResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_rate_limiter(
        rate_limit_rps: u32,
    ) -> FetchResult<RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>> {
        let quota = Quota::per_second(NonZeroU32::new(rate_limit_rps).ok_or_else(|| {
            FetchError::InvalidUrl {
                url: "rate limit must be non-zero".to_string(),
            }
        })?);
        Ok(RateLimiter::direct(quota))
    }

    /// Fetches the HTTP response with rate limiting and retry logic
    ///
    /// This method returns the raw `reqwest::Response` for streaming
    /// transfers. Use [`get_json`](Self::get_json) for API payloads.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the HTTP request fails after retries
    pub async fn get_response(&self, url: &Url) -> FetchResult<reqwest::Response> {
        // Apply rate limiting with jitter to avoid thundering herd
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;

        let mut retries = 0;
        loop {
            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    // Check for rate limiting from server
                    if response.status() == 429 {
                        if retries < limits::MAX_RETRIES {
                            retries += 1;
                            let delay = Duration::from_millis(
                                limits::RETRY_BASE_DELAY_MS * 2_u64.pow(retries),
                            );
                            tracing::warn!(
                                "Rate limited by server (429). Backing off for {}ms",
                                delay.as_millis()
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        } else {
                            return Err(FetchError::RateLimitExceeded);
                        }
                    }

                    // Check for server overload
                    if response.status() == 503 {
                        if retries < limits::MAX_RETRIES {
                            retries += 1;
                            let delay = Duration::from_millis(
                                limits::RETRY_BASE_DELAY_MS * 2_u64.pow(retries),
                            );
                            tracing::warn!(
                                "Server overloaded (503). Backing off for {}ms",
                                delay.as_millis()
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        } else {
                            return Err(FetchError::ServerError { status: 503 });
                        }
                    }

                    tracing::debug!("Successfully fetched response: {}", url);
                    return Ok(response);
                }
                Err(e) if retries < limits::MAX_RETRIES => {
                    retries += 1;
                    let delay =
                        Duration::from_millis(limits::RETRY_BASE_DELAY_MS * 2_u64.pow(retries));
                    tracing::warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {}ms",
                        retries,
                        limits::MAX_RETRIES,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        "Request failed after {} retries: {}",
                        limits::MAX_RETRIES,
                        e
                    );
                    return Err(FetchError::MaxRetriesExceeded {
                        max_retries: limits::MAX_RETRIES,
                    });
                }
            }
        }
    }

    /// Fetches a JSON API payload with rate limiting and retry logic
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ServerError` for non-success statuses and
    /// `FetchError::Decode` when the body does not match `T`
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> FetchResult<T> {
        let response = self.get_response(url).await?;

        if !response.status().is_success() {
            return Err(FetchError::ServerError {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(FetchError::Decode)
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
