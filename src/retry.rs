//! Retry bookkeeping for rate-limited requests
//!
//! The remote signals throttling with a "too many requests" status and puts
//! the real meaning in the body: a per-second throttle that clears on its own
//! (worth retrying immediately) or a daily quota that stays spent until the
//! quota period rolls over (fatal). This module classifies those responses
//! and tracks per-call attempt state.
//!
//! Every logical call owns its own [`RetryState`], built fresh at dispatch
//! time. A single state shared across concurrently running calls would count
//! every sibling's failures against each call's ceiling, so the batch layer
//! clones a new state per work unit by construction.

use crate::config::{RateLimitConfig, RetryConfig};

/// HTTP status the remote uses for both throttle conditions
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Which throttle condition a rate-limited response describes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitKind {
    /// Transient per-second throttle, retryable
    PerSecond,
    /// Daily quota spent, fatal for the rest of the quota period
    DailyQuota,
}

/// Classify a response as one of the throttle conditions, if it is one
///
/// Returns `None` for anything that is not a rate-limit response. The body is
/// matched against the configured marker strings, since the exact text is a
/// remote-service contract detail.
pub fn classify_rate_limit(
    status: u16,
    body: &str,
    config: &RateLimitConfig,
) -> Option<RateLimitKind> {
    if status != TOO_MANY_REQUESTS {
        return None;
    }
    if body.contains(&config.daily_quota_marker) {
        Some(RateLimitKind::DailyQuota)
    } else if body.contains(&config.per_second_marker) {
        Some(RateLimitKind::PerSecond)
    } else {
        None
    }
}

/// What the caller should do after a transient throttle response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Try the request again immediately
    Retry,
    /// The attempt ceiling is spent, surface the failure
    Exhausted,
    /// Retries are disabled for this call, surface the failure
    Disabled,
}

/// Per-call retry bookkeeping
///
/// Tracks which attempt a logical call is on. Created once per call (or per
/// batch work unit) and discarded when the call terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryState {
    current_attempt: u32,
    retry_enabled: bool,
    max_attempts: u32,
}

impl RetryState {
    /// Create a state on its first attempt
    pub fn new(retry_enabled: bool, max_attempts: u32) -> Self {
        Self {
            current_attempt: 1,
            retry_enabled,
            max_attempts,
        }
    }

    /// Create a fresh state from the client's retry configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.enabled, config.max_attempts)
    }

    /// The attempt the call is currently on, starting at 1
    pub fn current_attempt(&self) -> u32 {
        self.current_attempt
    }

    /// Configured attempt ceiling
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a transient throttle response and decide whether to go again
    ///
    /// Advances the attempt counter only when the decision is
    /// [`RetryDecision::Retry`]. Fatal quota responses must not be reported
    /// here; they terminate the call without touching the counter.
    pub fn on_throttled(&mut self) -> RetryDecision {
        if !self.retry_enabled {
            return RetryDecision::Disabled;
        }
        if self.current_attempt <= self.max_attempts {
            self.current_attempt += 1;
            RetryDecision::Retry
        } else {
            RetryDecision::Exhausted
        }
    }
}
