//! Core client implementation split into focused submodules.
//!
//! The [`Client`] struct and its methods are organized by concern:
//! - [`endpoints`] - Typed single-request API operations (search, details, reviews)
//! - [`batch`] - Batched and parallel business-detail retrieval strategies
//!
//! This module holds the shared request path: URL construction, credential
//! attachment, and the bounded retry loop that resolves transient rate
//! limiting before anything surfaces to the caller.

mod batch;
mod endpoints;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use batch::{BatchOptions, FailurePolicy};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::retry::{classify_rate_limit, RateLimitKind, RetryDecision, RetryState};
use crate::transport::{HttpTransport, Method, RequestBody, Transport, TransportRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Client for the local-business-search API
///
/// Cheap to clone; the transport and configuration are shared behind `Arc`.
/// All methods take `&self` and are safe to call from concurrent tasks.
///
/// # Example
///
/// ```no_run
/// use localsearch::{Client, SearchParameters};
///
/// # async fn example() -> Result<(), localsearch::Error> {
/// let client = Client::new("app-secret-from-developer-portal")?;
/// let found = client
///     .search(&SearchParameters::new(37.7749, -122.4194).term("coffee"))
///     .await?;
/// println!("{} matches", found.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: Arc<Config>,
    api_key: String,
    base: Url,
}

impl Client {
    /// Create a client with the default configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the API key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, Config::default())
    }

    /// Create a client with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the API key is blank or the
    /// configured base URL does not parse.
    pub fn with_config(api_key: impl Into<String>, config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config.timeout));
        Self::with_transport(api_key, config, transport)
    }

    /// Create a client on top of a custom [`Transport`] implementation
    ///
    /// Intended for tests and for embedding the client behind instrumented or
    /// recorded transports.
    pub fn with_transport(
        api_key: impl Into<String>,
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::invalid_argument("api_key must not be blank"));
        }

        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::invalid_argument(format!("base_url {:?} is not a valid URL: {e}", config.base_url))
        })?;

        Ok(Self {
            transport,
            config: Arc::new(config),
            api_key,
            base,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the absolute URL for an endpoint path such as `/businesses/search`
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url> {
        let versioned = format!("{}{}", self.config.api_version, path);
        self.base
            .join(&versioned)
            .map_err(|e| Error::invalid_argument(format!("cannot build URL for {versioned:?}: {e}")))
    }

    /// Issue a GET and decode the JSON response body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        retry_state: RetryState,
    ) -> Result<T> {
        let body = self.send_with_retry(Method::Get, url, None, retry_state).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send one logical request, resolving transient rate limiting internally
    ///
    /// This is the single place every remote call goes through. Transport
    /// failures and non-throttle error statuses surface immediately; the
    /// per-second throttle is retried until `retry_state` runs out; the
    /// daily-quota response is fatal on sight and consumes no attempt.
    pub(crate) async fn send_with_retry(
        &self,
        method: Method,
        url: Url,
        body: Option<RequestBody>,
        mut retry_state: RetryState,
    ) -> Result<String> {
        loop {
            let request = TransportRequest {
                method,
                url: url.clone(),
                bearer_token: Some(self.api_key.clone()),
                body: body.clone(),
            };

            let response = self.transport.send(request).await?;

            if (200..300).contains(&response.status) {
                return Ok(response.body);
            }

            match classify_rate_limit(response.status, &response.body, &self.config.rate_limit) {
                Some(RateLimitKind::DailyQuota) => {
                    tracing::error!(url = %url, "daily access limit reached, giving up");
                    return Err(Error::AccessLimitExceeded);
                }
                Some(RateLimitKind::PerSecond) => match retry_state.on_throttled() {
                    RetryDecision::Retry => {
                        tracing::warn!(
                            url = %url,
                            attempt = retry_state.current_attempt(),
                            max_attempts = retry_state.max_attempts(),
                            "rate limited, retrying"
                        );
                        continue;
                    }
                    RetryDecision::Exhausted | RetryDecision::Disabled => {
                        tracing::warn!(
                            url = %url,
                            attempts = retry_state.current_attempt(),
                            "rate limited and out of retries"
                        );
                        return Err(Error::RetriesExhausted {
                            attempts: retry_state.current_attempt(),
                        });
                    }
                },
                None => {
                    return Err(Error::UnexpectedStatus {
                        status: response.status,
                        body: response.body,
                    });
                }
            }
        }
    }

    /// A fresh retry state from the configured retry settings
    ///
    /// Batch strategies call this once per work unit at dispatch time, so no
    /// two concurrent units ever share a counter.
    pub(crate) fn fresh_retry_state(&self) -> RetryState {
        RetryState::from_config(&self.config.retry)
    }
}
