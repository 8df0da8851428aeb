//! Batched and parallel business-detail retrieval
//!
//! Four strategies over the same primitive pieces, differing only in
//! concurrency shape:
//!
//! 1. **Serial** - one detail request per identifier, in order, one at a time
//! 2. **Parallel** - one detail request per identifier behind the bounded
//!    executor
//! 3. **Bulk** - every identifier in a single bulk-lookup request
//! 4. **Chunked** - identifiers split into fixed-size chunks, one bulk-lookup
//!    request per chunk, run in series or in parallel
//!
//! All strategies return businesses in the order the identifiers were
//! submitted, regardless of network completion order. The parallel and
//! chunked strategies never throw away work: when some units fail, the
//! outcome is [`Error::PartialBatch`] carrying both the retrieved businesses
//! and the per-unit errors.
//!
//! Every work unit is dispatched with its own fresh retry state. A shared
//! counter would let one unit's throttling spend its siblings' retry budget.

use super::Client;
use crate::chunker;
use crate::error::{ChunkFailure, Error, PartialBatchFailure, Result};
use crate::executor::{self, RunOptions};
use crate::models::Business;
use crate::retry::RetryState;
use crate::transport::{Method, RequestBody};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fragment name referenced by every entry in a bulk-lookup document
const BULK_FRAGMENT_NAME: &str = "businessInfo";

/// Default field selection for bulk lookups
///
/// Exposed so callers can see what a bulk-retrieved [`Business`] will have
/// populated; pass [`BatchOptions::fields`] to request a different selection.
pub const DEFAULT_BULK_FIELDS: &str = "\
id
alias
photos
name
url
rating
review_count
price
categories {
    title
    alias
}
location {
    address1
    address2
    address3
    city
    state
    zip_code
}
display_phone
coordinates {
    latitude
    longitude
}
hours {
    is_open_now
}";

/// What a strategy does when one retrieval fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and return its error
    #[default]
    Propagate,
    /// Keep going and report successes and failures together as
    /// [`Error::PartialBatch`]
    CollectPartial,
}

/// Per-call options for the batch strategies
///
/// Everything left as `None` falls back to the client's
/// [`BatchConfig`](crate::BatchConfig) values.
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Concurrency cap for the parallel strategies
    pub max_concurrency: Option<usize>,
    /// Identifiers per chunk for the chunked strategies
    pub chunk_size: Option<usize>,
    /// Field selection for bulk-lookup requests
    pub fields: Option<String>,
    /// External cancellation signal; cancelled units are reported as failed
    /// with [`Error::Cancelled`]
    pub cancel: Option<CancellationToken>,
}

impl Client {
    /// Retrieve business details one identifier at a time, in order
    ///
    /// With [`FailurePolicy::Propagate`] (the default policy) the first
    /// failure stops the run and is returned as-is; already retrieved
    /// businesses are discarded. [`FailurePolicy::CollectPartial`] retrieves
    /// everything it can and reports failures via [`Error::PartialBatch`].
    pub async fn business_details_serial(
        &self,
        business_ids: &[String],
        policy: FailurePolicy,
    ) -> Result<Vec<Business>> {
        let mut businesses = Vec::with_capacity(business_ids.len());
        let mut failures = Vec::new();

        for (index, id) in business_ids.iter().enumerate() {
            match self.business_details_with_state(id, self.fresh_retry_state()).await {
                Ok(business) => businesses.push(business),
                Err(error) => match policy {
                    FailurePolicy::Propagate => return Err(error),
                    FailurePolicy::CollectPartial => failures.push(ChunkFailure {
                        chunk_index: index,
                        ids: vec![id.clone()],
                        error: Box::new(error),
                    }),
                },
            }
        }

        finish_batch(businesses, failures)
    }

    /// Retrieve business details with one concurrent request per identifier
    ///
    /// Results come back in identifier order no matter which requests finish
    /// first. The concurrency cap defaults to the configured
    /// `batch.max_concurrency`; raising it speeds large batches up at the
    /// cost of more per-second throttling from the remote.
    pub async fn business_details_parallel(
        &self,
        business_ids: &[String],
        options: BatchOptions,
    ) -> Result<Vec<Business>> {
        if business_ids.is_empty() {
            return Ok(Vec::new());
        }

        let run_options = self.run_options(&options, false);
        let client = self.clone();
        let results = executor::run_all(
            business_ids.to_vec(),
            run_options,
            move |_, id: String| {
                let client = client.clone();
                async move {
                    let business = client
                        .business_details_with_state(&id, client.fresh_retry_state())
                        .await?;
                    Ok(vec![business])
                }
            },
        )
        .await?;

        let unit_ids: Vec<Vec<String>> = business_ids.iter().map(|id| vec![id.clone()]).collect();
        let outcome = collect_unit_results(results, &unit_ids);
        log_outcome("parallel", business_ids.len(), &outcome);
        outcome
    }

    /// Retrieve business details for every identifier in one bulk request
    ///
    /// The remote caps how many identifiers one bulk request may carry;
    /// exceeding `batch.max_batch_size` is an [`Error::InvalidArgument`], not
    /// a retryable condition. An empty identifier list short-circuits to an
    /// empty result without touching the network.
    pub async fn business_details_bulk(
        &self,
        business_ids: &[String],
        options: BatchOptions,
    ) -> Result<Vec<Business>> {
        if business_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ceiling = self.config.batch.max_batch_size;
        if business_ids.len() > ceiling {
            return Err(Error::invalid_argument(format!(
                "{} identifiers exceed the bulk request ceiling of {ceiling}",
                business_ids.len()
            )));
        }

        let fields = options
            .fields
            .unwrap_or_else(|| DEFAULT_BULK_FIELDS.to_string());
        self.bulk_lookup(business_ids, &fields, self.fresh_retry_state())
            .await
    }

    /// Retrieve business details in fixed-size chunks, one chunk at a time
    ///
    /// More requests than [`business_details_bulk`](Self::business_details_bulk),
    /// but each one is smaller and faster. Chunk failures do not abandon the
    /// chunks that already succeeded; see [`Error::PartialBatch`].
    pub async fn business_details_chunked(
        &self,
        business_ids: &[String],
        options: BatchOptions,
    ) -> Result<Vec<Business>> {
        self.chunked_inner(business_ids, options, true).await
    }

    /// Retrieve business details in fixed-size chunks, chunks in parallel
    ///
    /// The fastest strategy for large identifier lists: chunked like
    /// [`business_details_chunked`](Self::business_details_chunked), with the
    /// chunks running behind the bounded executor.
    pub async fn business_details_chunked_parallel(
        &self,
        business_ids: &[String],
        options: BatchOptions,
    ) -> Result<Vec<Business>> {
        self.chunked_inner(business_ids, options, false).await
    }

    async fn chunked_inner(
        &self,
        business_ids: &[String],
        options: BatchOptions,
        series: bool,
    ) -> Result<Vec<Business>> {
        let chunk_size = options.chunk_size.unwrap_or(self.config.batch.chunk_size);
        let chunks = chunker::split(business_ids, chunk_size)?;
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let run_options = self.run_options(&options, series);
        let fields: Arc<str> = options
            .fields
            .clone()
            .unwrap_or_else(|| DEFAULT_BULK_FIELDS.to_string())
            .into();

        let client = self.clone();
        let results = executor::run_all(chunks.clone(), run_options, move |_, chunk: Vec<String>| {
            let client = client.clone();
            let fields = Arc::clone(&fields);
            async move {
                // Each unit submits only its own chunk's identifiers
                client
                    .bulk_lookup(&chunk, &fields, client.fresh_retry_state())
                    .await
            }
        })
        .await?;

        let outcome = collect_unit_results(results, &chunks);
        log_outcome(if series { "chunked" } else { "chunked-parallel" }, business_ids.len(), &outcome);
        outcome
    }

    /// One bulk-lookup request for the given identifiers
    pub(crate) async fn bulk_lookup(
        &self,
        business_ids: &[String],
        fields: &str,
        retry_state: RetryState,
    ) -> Result<Vec<Business>> {
        let url = self.endpoint_url("/graphql")?;
        let document = build_bulk_document(business_ids, fields);
        let body = self
            .send_with_retry(
                Method::Post,
                url,
                Some(RequestBody {
                    content_type: "application/graphql".to_string(),
                    content: document,
                }),
                retry_state,
            )
            .await?;
        decode_bulk_response(&body, business_ids.len())
    }

    /// Executor options for one batch invocation
    fn run_options(&self, options: &BatchOptions, series: bool) -> RunOptions {
        let max_concurrency = if series {
            1
        } else {
            options
                .max_concurrency
                .unwrap_or(self.config.batch.max_concurrency)
        };
        let warmup = self.config.batch.warmup_delay;
        RunOptions {
            max_concurrency,
            warmup_delay: (!warmup.is_zero()).then_some(warmup),
            cancel: options.cancel.clone().unwrap_or_default(),
        }
    }
}

/// Fold per-unit outcomes into one ordered result or a partial failure
fn collect_unit_results(
    results: Vec<Result<Vec<Business>>>,
    unit_ids: &[Vec<String>],
) -> Result<Vec<Business>> {
    let mut businesses = Vec::new();
    let mut failures = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(mut list) => businesses.append(&mut list),
            Err(error) => failures.push(ChunkFailure {
                chunk_index: index,
                ids: unit_ids[index].clone(),
                error: Box::new(error),
            }),
        }
    }

    finish_batch(businesses, failures)
}

fn finish_batch(businesses: Vec<Business>, failures: Vec<ChunkFailure>) -> Result<Vec<Business>> {
    if failures.is_empty() {
        Ok(businesses)
    } else {
        Err(Error::PartialBatch(PartialBatchFailure {
            businesses,
            failures,
        }))
    }
}

fn log_outcome(strategy: &str, requested: usize, outcome: &Result<Vec<Business>>) {
    match outcome {
        Ok(businesses) => tracing::info!(
            strategy = strategy,
            requested = requested,
            retrieved = businesses.len(),
            "batch retrieval complete"
        ),
        Err(Error::PartialBatch(partial)) => tracing::warn!(
            strategy = strategy,
            requested = requested,
            retrieved = partial.businesses.len(),
            failed_units = partial.failures.len(),
            "batch retrieval partially failed"
        ),
        Err(error) => tracing::warn!(
            strategy = strategy,
            requested = requested,
            error = %error,
            "batch retrieval failed"
        ),
    }
}

/// Render the bulk-lookup document for a set of identifiers
fn build_bulk_document(business_ids: &[String], fields: &str) -> String {
    let mut document = String::from("{ ");
    for (index, id) in business_ids.iter().enumerate() {
        document.push_str(&format!(
            "\nb{}: business(id: \"{}\") {{ \n    ...{} \n}} ",
            index + 1,
            escape_id(id),
            BULK_FRAGMENT_NAME
        ));
    }
    document.push_str("\n} \n");
    document.push_str(&format!(
        "\nfragment {BULK_FRAGMENT_NAME} on Business {{ \n{fields}\n}} \n"
    ));
    document
}

/// Escape an identifier for embedding in a quoted document string
fn escape_id(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Decode a bulk-lookup response into businesses in request order
///
/// The response object keys the businesses as `b1..bN`. Entries are read back
/// by key in request order, so the output order never depends on how the JSON
/// object happens to be arranged.
fn decode_bulk_response(body: &str, expected: usize) -> Result<Vec<Business>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let data = value
        .get("data")
        .and_then(serde_json::Value::as_object)
        .ok_or_else(|| {
            Error::Decode(serde::de::Error::custom("bulk response has no data object"))
        })?;

    let mut businesses = Vec::with_capacity(expected);
    for index in 1..=expected {
        let key = format!("b{index}");
        let entry = data.get(&key).filter(|value| !value.is_null()).ok_or_else(|| {
            Error::Decode(serde::de::Error::custom(format!(
                "bulk response is missing entry {key}"
            )))
        })?;
        businesses.push(serde_json::from_value(entry.clone())?);
    }
    Ok(businesses)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_document_numbers_entries_in_order() {
        let ids = vec!["alpha".to_string(), "beta".to_string()];
        let document = build_bulk_document(&ids, "id\nname");

        let alpha = document.find(r#"b1: business(id: "alpha")"#).unwrap();
        let beta = document.find(r#"b2: business(id: "beta")"#).unwrap();
        assert!(alpha < beta);
        assert!(document.contains("fragment businessInfo on Business"));
        assert!(document.contains("...businessInfo"));
    }

    #[test]
    fn bulk_document_escapes_quotes() {
        let ids = vec![r#"we"ird"#.to_string()];
        let document = build_bulk_document(&ids, "id");
        assert!(document.contains(r#"business(id: "we\"ird")"#));
    }

    #[test]
    fn bulk_response_decodes_in_request_order() {
        // Keys deliberately out of order in the JSON text
        let body = r#"{"data": {
            "b2": {"id": "second"},
            "b1": {"id": "first"},
            "b3": {"id": "third"}
        }}"#;

        let businesses = decode_bulk_response(body, 3).unwrap();
        let ids: Vec<&str> = businesses.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn bulk_response_with_missing_entry_is_a_decode_error() {
        let body = r#"{"data": {"b1": {"id": "only"}}}"#;
        assert!(matches!(
            decode_bulk_response(body, 2),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn bulk_response_with_null_entry_is_a_decode_error() {
        let body = r#"{"data": {"b1": null}}"#;
        assert!(matches!(
            decode_bulk_response(body, 1),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn bulk_response_without_data_is_a_decode_error() {
        assert!(matches!(
            decode_bulk_response(r#"{"errors": []}"#, 1),
            Err(Error::Decode(_))
        ));
    }
}
