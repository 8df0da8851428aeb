//! Bounded-concurrency execution of batch work units
//!
//! [`run_all`] schedules a set of independent asynchronous work units behind
//! a counting admission gate, joins them all, and returns their outcomes in
//! submission order. It is the concurrency engine under the parallel and
//! chunked retrieval strategies.
//!
//! Three rules shape the implementation:
//!
//! - A unit must hold a semaphore permit while it runs, so no more than
//!   `max_concurrency` units are ever in flight. The permit is an RAII guard
//!   and is released however the unit ends.
//! - Every unit except the first can be made to wait out a one-time warm-up
//!   delay before admission, giving a shared first-use setup step (such as
//!   the remote validating a credential) time to finish unraced. The warm-up
//!   is a single shared future, so the delay applies once per batch.
//! - Results land in positional slots indexed by submission order. Completion
//!   order never affects output order.

use crate::error::{Error, Result};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Options for one [`run_all`] invocation
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Maximum number of units in flight at once, at least 1
    pub max_concurrency: usize,
    /// One-time pause between dispatching the first unit and admitting the
    /// rest, `None` to start all units immediately
    pub warmup_delay: Option<Duration>,
    /// External cancellation signal; cancelled units report
    /// [`Error::Cancelled`] in their slot
    pub cancel: CancellationToken,
}

impl RunOptions {
    /// Options with the given concurrency cap, no warm-up, and a fresh
    /// (never-cancelled) token
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency,
            warmup_delay: None,
            cancel: CancellationToken::new(),
        }
    }
}

/// Run every unit through `worker` with bounded concurrency and collect all
/// outcomes in submission order
///
/// The returned vector has one entry per unit, success or failure; a unit's
/// failure never aborts its siblings. The call returns only once every unit
/// has completed, failed, or been cancelled.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `max_concurrency` is zero. All
/// per-unit failures are reported inside the result vector instead.
pub async fn run_all<U, T, F, Fut>(
    units: Vec<U>,
    options: RunOptions,
    worker: F,
) -> Result<Vec<Result<T>>>
where
    U: Send + 'static,
    T: Send + 'static,
    F: Fn(usize, U) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if options.max_concurrency == 0 {
        return Err(Error::invalid_argument("max_concurrency must be at least 1"));
    }

    let unit_count = units.len();
    if unit_count == 0 {
        return Ok(Vec::new());
    }

    tracing::debug!(
        units = unit_count,
        max_concurrency = options.max_concurrency,
        warmup_ms = options.warmup_delay.map(|d| d.as_millis() as u64),
        "dispatching batch work units"
    );

    let gate = Arc::new(Semaphore::new(options.max_concurrency));
    let worker = Arc::new(worker);
    // One shared warm-up future; the timer starts on first poll, which happens
    // as the second unit is dispatched.
    let warmup = options
        .warmup_delay
        .map(|delay| tokio::time::sleep(delay).boxed().shared());

    let mut join_set = JoinSet::new();
    for (index, unit) in units.into_iter().enumerate() {
        let gate = Arc::clone(&gate);
        let worker = Arc::clone(&worker);
        let cancel = options.cancel.clone();
        // The first unit goes straight to admission
        let warmup = if index == 0 { None } else { warmup.clone() };

        join_set.spawn(async move {
            if let Some(warmup) = warmup {
                tokio::select! {
                    _ = cancel.cancelled() => return (index, Err(Error::Cancelled)),
                    _ = warmup => {}
                }
            }

            // A token that fired before this unit got anywhere aborts
            // admission outright
            if cancel.is_cancelled() {
                return (index, Err(Error::Cancelled));
            }

            let permit = tokio::select! {
                _ = cancel.cancelled() => return (index, Err(Error::Cancelled)),
                permit = gate.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return (index, Err(Error::Other("admission gate closed".to_string()))),
                },
            };
            // Held until the unit finishes; dropping it releases the slot on
            // every exit path, including cancellation.
            let _permit = permit;

            let result = tokio::select! {
                _ = cancel.cancelled() => Err(Error::Cancelled),
                result = (*worker)(index, unit) => result,
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<T>>> = Vec::with_capacity(unit_count);
    slots.resize_with(unit_count, || None);

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(join_error) => {
                // The unit's index is lost with the panic; its slot stays
                // empty and is reported below.
                tracing::error!(error = %join_error, "batch work unit aborted");
            }
        }
    }

    Ok(slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(Error::Other("work unit aborted before completing".to_string())))
        })
        .collect())
}
