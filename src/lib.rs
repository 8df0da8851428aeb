//! # localsearch
//!
//! Typed client library for a local-business-search web API, with a
//! batched/parallel retrieval layer for fetching many business records at
//! once.
//!
//! ## Design Philosophy
//!
//! localsearch is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Order-preserving** - Batch results always come back in the order the
//!   identifiers were submitted, no matter how the network reorders completions
//! - **Throttle-aware** - The remote's per-second throttle is retried with
//!   per-call bookkeeping; its daily quota exhaustion fails fast
//! - **Partial-failure-friendly** - Chunked and parallel retrieval reports
//!   what succeeded alongside what failed, instead of discarding retrieved data
//!
//! ## Quick Start
//!
//! ```no_run
//! use localsearch::{BatchOptions, Client, SearchParameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("app-secret-from-developer-portal")?;
//!
//!     // Typed single-request operations
//!     let found = client
//!         .search(&SearchParameters::new(37.7749, -122.4194).term("coffee"))
//!         .await?;
//!     for business in &found.businesses {
//!         println!("{}", business.name.as_deref().unwrap_or("(unnamed)"));
//!     }
//!
//!     // Batched detail retrieval: chunked, chunks fetched in parallel
//!     let ids: Vec<String> = found.businesses.iter().map(|b| b.id.clone()).collect();
//!     let details = client
//!         .business_details_chunked_parallel(&ids, BatchOptions::default())
//!         .await?;
//!     println!("retrieved {} businesses", details.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Splitting identifier lists into fixed-size chunks
pub mod chunker;
/// The API client and its batch retrieval strategies
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bounded-concurrency execution of batch work units
pub mod executor;
/// Typed payload models
pub mod models;
/// Retry bookkeeping for rate-limited requests
pub mod retry;
/// HTTP transport abstraction
pub mod transport;

// Re-export commonly used types
pub use client::{BatchOptions, Client, FailurePolicy};
pub use config::{BatchConfig, Config, RateLimitConfig, RetryConfig};
pub use error::{ChunkFailure, Error, PartialBatchFailure, Result, TransportError};
pub use executor::{run_all, RunOptions};
pub use models::{
    AutocompleteResponse, Business, Category, Coordinate, Location, Review, ReviewsResponse,
    SearchParameters, SearchResponse,
};
pub use retry::{RateLimitKind, RetryState};
pub use transport::{
    HttpTransport, Method, RequestBody, Transport, TransportRequest, TransportResponse,
};
