//! Error types for localsearch
//!
//! This module provides error handling for the library, including:
//! - Transport-level failures (connection, timeout, invalid URL)
//! - Rate-limit outcomes (retries exhausted, daily access limit reached)
//! - Partial batch failures that carry the successfully retrieved payloads
//! - Argument validation errors (chunk size, coordinates, batch size)

use crate::models::Business;
use thiserror::Error;

/// Result type alias for localsearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for localsearch
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or connection-level failure. Never retried automatically;
    /// the retry loop only covers transient rate limiting.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The remote returned a success status but the payload could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transient rate limiting persisted past the configured attempt ceiling
    #[error("rate limited by remote service, gave up after {attempts} attempt(s)")]
    RetriesExhausted {
        /// Number of attempts that were made before giving up
        attempts: u32,
    },

    /// The daily access quota for this credential is spent. Permanent for the
    /// rest of the quota period, so it is never retried.
    #[error("daily access limit for the API credential has been reached")]
    AccessLimitExceeded,

    /// A caller-supplied argument was invalid
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description of the invalid argument
        message: String,
    },

    /// The remote returned a status the client does not handle (not 2xx, not 429)
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the remote
        status: u16,
        /// Raw response body, useful for diagnosing remote-side errors
        body: String,
    },

    /// A chunked or parallel batch partially failed. Carries both the payloads
    /// that were retrieved and the per-chunk errors, so the caller can decide
    /// whether partial success is acceptable.
    #[error("{0}")]
    PartialBatch(PartialBatchFailure),

    /// The operation was aborted by a cancellation token
    #[error("operation cancelled")]
    Cancelled,

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Transport-level errors
///
/// Kept separate from [`Error`] so transport implementations other than the
/// built-in reqwest one (including test doubles) can construct them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client error (connection refused, timeout, TLS, invalid URL)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// Outcome of a chunked or parallel batch where at least one unit failed
///
/// The successfully retrieved businesses are flattened in submission order;
/// each failed unit is recorded with the identifiers it covered and the error
/// that terminated it.
#[derive(Debug)]
pub struct PartialBatchFailure {
    /// Payloads from the units that succeeded, in submission order
    pub businesses: Vec<Business>,
    /// One entry per failed unit
    pub failures: Vec<ChunkFailure>,
}

impl std::fmt::Display for PartialBatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "batch partially failed: {} unit(s) failed, {} business(es) retrieved",
            self.failures.len(),
            self.businesses.len()
        )
    }
}

/// A single failed unit within a chunked or parallel batch
#[derive(Debug)]
pub struct ChunkFailure {
    /// Zero-based index of the unit in submission order
    pub chunk_index: usize,
    /// Identifiers the failed unit was responsible for
    pub ids: Vec<String>,
    /// The error that terminated the unit
    pub error: Box<Error>,
}

impl Error {
    /// Helper to build an [`Error::InvalidArgument`] from anything displayable
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
