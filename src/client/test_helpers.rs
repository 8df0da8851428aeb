//! Shared test fixtures for client tests
//!
//! Provides a scripted [`Transport`] so batch and retry behavior can be
//! exercised without a network, plus canned response bodies for the happy
//! path and both throttle conditions.

use crate::client::Client;
use crate::config::Config;
use crate::error::TransportError;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted reply, optionally delayed to control completion order
pub(crate) struct Scripted {
    pub delay: Duration,
    pub result: Result<TransportResponse, TransportError>,
}

impl Scripted {
    pub fn ok(status: u16, body: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(TransportResponse {
                status,
                body: body.into(),
            }),
        }
    }

    pub fn ok_after(delay: Duration, status: u16, body: impl Into<String>) -> Self {
        Self {
            delay,
            ..Self::ok(status, body)
        }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(TransportError::Other(message.into())),
        }
    }
}

type Responder = dyn Fn(&TransportRequest, usize) -> Scripted + Send + Sync;

/// Transport double driven by a responder closure
///
/// Records every request it sees; the closure receives the request and the
/// zero-based global call index and scripts the reply.
pub(crate) struct ScriptedTransport {
    respond: Box<Responder>,
    calls: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new(
        respond: impl Fn(&TransportRequest, usize) -> Scripted + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Number of recorded calls whose URL path matches exactly
    pub fn calls_to(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|request| request.url.path() == path)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let scripted = {
            let mut calls = self.calls.lock().expect("calls lock");
            let index = calls.len();
            calls.push(request.clone());
            (self.respond)(&request, index)
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

/// Config pointed at a fake host, with the warm-up delay switched off so
/// tests do not spend wall-clock time in it
pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.base_url = "http://api.localsearch.test".to_string();
    config.batch.warmup_delay = Duration::ZERO;
    config
}

/// Client over a scripted transport, default test config
pub(crate) fn client_with(
    respond: impl Fn(&TransportRequest, usize) -> Scripted + Send + Sync + 'static,
) -> (Client, Arc<ScriptedTransport>) {
    client_with_config(test_config(), respond)
}

pub(crate) fn client_with_config(
    config: Config,
    respond: impl Fn(&TransportRequest, usize) -> Scripted + Send + Sync + 'static,
) -> (Client, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new(respond);
    let client = Client::with_transport("test-key", config, transport.clone())
        .expect("test client construction");
    (client, transport)
}

/// Minimal business payload for the given identifier
pub(crate) fn business_json(id: &str) -> String {
    format!(r#"{{"id": "{id}", "name": "Business {id}"}}"#)
}

/// 429 body for the transient per-second throttle
pub(crate) fn per_second_body() -> String {
    r#"{"error": {"code": "TOO_MANY_REQUESTS_PER_SECOND", "description": "spread your requests out"}}"#
        .to_string()
}

/// 429 body for the spent daily quota
pub(crate) fn daily_quota_body() -> String {
    r#"{"error": {"code": "ACCESS_LIMIT_REACHED", "description": "come back tomorrow"}}"#.to_string()
}

/// The identifier of a detail request, from its URL path
pub(crate) fn id_from_path(request: &TransportRequest) -> String {
    request
        .url
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Identifiers requested by a bulk-lookup document, in document order
pub(crate) fn ids_in_document(document: &str) -> Vec<String> {
    document
        .split("business(id: \"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

/// Well-formed bulk response answering every identifier in the document
pub(crate) fn bulk_response_for(document: &str) -> String {
    let entries: Vec<String> = ids_in_document(document)
        .iter()
        .enumerate()
        .map(|(index, id)| format!(r#""b{}": {}"#, index + 1, business_json(id)))
        .collect();
    format!(r#"{{"data": {{{}}}}}"#, entries.join(", "))
}
