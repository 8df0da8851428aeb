//! Shared helpers for the wiremock integration suites
#![allow(dead_code)]

use localsearch::{Client, Config};
use std::time::Duration;

/// Client pointed at a wiremock server, warm-up disabled so suites run fast
pub fn client_for(server_uri: &str) -> Client {
    client_with(server_uri, Config::default())
}

/// Client pointed at a wiremock server with a caller-tweaked config
pub fn client_with(server_uri: &str, mut config: Config) -> Client {
    config.base_url = server_uri.to_string();
    config.batch.warmup_delay = Duration::ZERO;
    config.timeout = Duration::from_secs(5);
    Client::with_config("integration-test-key", config).expect("client construction")
}

/// Minimal business payload for the given identifier
pub fn business_body(id: &str) -> String {
    format!(r#"{{"id": "{id}", "name": "Business {id}", "rating": 4.0}}"#)
}

/// Bulk-lookup response answering the given identifiers as `b1..bN`
pub fn bulk_body(ids: &[String]) -> String {
    let entries: Vec<String> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| format!(r#""b{}": {}"#, index + 1, business_body(id)))
        .collect();
    format!(r#"{{"data": {{{}}}}}"#, entries.join(", "))
}

/// 429 body for the transient per-second throttle
pub fn per_second_body() -> &'static str {
    r#"{"error": {"code": "TOO_MANY_REQUESTS_PER_SECOND"}}"#
}

/// 429 body for the spent daily quota
pub fn daily_quota_body() -> &'static str {
    r#"{"error": {"code": "ACCESS_LIMIT_REACHED"}}"#
}
