//! HTTP transport abstraction
//!
//! The [`Transport`] trait isolates the rest of the client from the HTTP
//! stack: one method that takes a prepared request and returns raw status and
//! body, or a transport-level error. Production code uses [`HttpTransport`]
//! on top of reqwest; tests substitute scripted implementations so batch and
//! retry behavior can be exercised without a network.

use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// HTTP method for a transport request
///
/// The client only ever issues GET and POST.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
}

/// Request body with an explicit content type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestBody {
    /// MIME type sent as `Content-Type`
    pub content_type: String,
    /// UTF-8 body text
    pub content: String,
}

/// A fully prepared outgoing request
#[derive(Clone, Debug)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL, query string included
    pub url: Url,
    /// Bearer credential attached as the `Authorization` header
    pub bearer_token: Option<String>,
    /// Optional body, POST only
    pub body: Option<RequestBody>,
}

/// Raw response from a transport request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

/// Trait for executing a single HTTP request
///
/// Implementations return the raw status and body for every response the
/// remote produced, including error statuses; [`TransportError`] is reserved
/// for failures where no response exists (connection refused, timeout, DNS).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the raw response
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by a shared [`reqwest::Client`]
///
/// Connection pooling and TLS come from reqwest; the per-request timeout is
/// fixed at construction from [`Config::timeout`](crate::Config::timeout).
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        tracing::debug!(
            method = ?request.method,
            url = %request.url,
            has_body = request.body.is_some(),
            "executing HTTP request"
        );

        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
        }
        .timeout(self.timeout);

        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, body.content_type)
                .body(body.content);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            url = %request.url,
            status = status,
            response_len = body.len(),
            "HTTP request completed"
        );

        Ok(TransportResponse { status, body })
    }
}
