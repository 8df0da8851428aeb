//! Configuration types
//!
//! All behavior of the client can be customized here, with defaults that work
//! against the production service out of the box. Configuration is plain data:
//! it is cloned into the client at construction time and never mutated behind
//! the caller's back.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for [`Client`](crate::Client)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote service (default: `https://api.localsearch.dev`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path prefix prepended to every endpoint (default: `/v3`)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_secs_serde")]
    pub timeout: Duration,

    /// Retry behavior for transient rate limiting
    #[serde(default)]
    pub retry: RetryConfig,

    /// Batch retrieval tuning
    #[serde(default)]
    pub batch: BatchConfig,

    /// Rate-limit response detection
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
            batch: BatchConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Retry configuration for transient rate-limit responses
///
/// Retries apply only to the per-second throttle response. Transport failures
/// and the daily quota response are never retried.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Whether rate-limited requests are retried at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of tries for one logical request (default: 10)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 10,
        }
    }
}

/// Batch retrieval configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of requests in flight at once for the parallel
    /// strategies (default: 2)
    ///
    /// Raising this speeds up large batches but increases the chance of the
    /// remote rejecting calls with its per-second throttle.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// How many identifiers each chunked-batch request carries (default: 25)
    ///
    /// Larger chunks mean fewer, slower calls; smaller chunks mean more,
    /// faster calls.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Hard ceiling on identifiers per one-shot bulk request (default: 50)
    ///
    /// Imposed by the remote service. Exceeding it is a caller error, not a
    /// retryable condition.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// One-time pause after dispatching the first unit of a batch, before any
    /// sibling unit starts (default: 500 ms)
    ///
    /// Gives the shared connection's first-use setup (credential validation on
    /// the remote side) time to finish before concurrent siblings race it.
    #[serde(default = "default_warmup_delay", with = "duration_ms_serde")]
    pub warmup_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 2,
            chunk_size: 25,
            max_batch_size: 50,
            warmup_delay: default_warmup_delay(),
        }
    }
}

/// Rate-limit response detection
///
/// The remote signals both throttle conditions with the same "too many
/// requests" status and distinguishes them only in the response body. The
/// marker text is a remote-service contract detail, so it is configurable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Body marker for the transient per-second throttle (retryable)
    #[serde(default = "default_per_second_marker")]
    pub per_second_marker: String,

    /// Body marker for the permanent daily-quota exhaustion (fatal)
    #[serde(default = "default_daily_quota_marker")]
    pub daily_quota_marker: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second_marker: default_per_second_marker(),
            daily_quota_marker: default_daily_quota_marker(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.localsearch.dev".to_string()
}

fn default_api_version() -> String {
    "/v3".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    10
}

fn default_max_concurrency() -> usize {
    2
}

fn default_chunk_size() -> usize {
    25
}

fn default_max_batch_size() -> usize {
    50
}

fn default_warmup_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_per_second_marker() -> String {
    "TOO_MANY_REQUESTS_PER_SECOND".to_string()
}

fn default_daily_quota_marker() -> String {
    "ACCESS_LIMIT_REACHED".to_string()
}

// Duration serialization helper (whole seconds)
mod duration_secs_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration serialization helper (milliseconds, for sub-second settings)
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.api_version, "/v3");
        assert_eq!(config.retry.max_attempts, 10);
        assert!(config.retry.enabled);
        assert_eq!(config.batch.max_concurrency, 2);
        assert_eq!(config.batch.chunk_size, 25);
        assert_eq!(config.batch.warmup_delay, Duration::from_millis(500));
    }

    #[test]
    fn deserializes_from_partial_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "base_url": "http://localhost:9999",
                "batch": { "max_concurrency": 4, "warmup_delay": 50 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.batch.max_concurrency, 4);
        assert_eq!(config.batch.warmup_delay, Duration::from_millis(50));
        // Unspecified sections fall back to defaults
        assert_eq!(config.batch.chunk_size, 25);
        assert_eq!(config.retry.max_attempts, 10);
        assert_eq!(config.rate_limit.per_second_marker, "TOO_MANY_REQUESTS_PER_SECOND");
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timeout, config.timeout);
        assert_eq!(back.batch.warmup_delay, config.batch.warmup_delay);
    }
}
