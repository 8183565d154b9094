//! Outbound authenticated HTTP calls.
//!
//! [`Transport`] is the seam between the dispatcher and the network:
//! [`HttpTransport`] performs real requests, tests substitute a recording
//! implementation.

mod http;

pub use http::HttpTransport;

use reqwest::{Method, StatusCode};
use std::fmt;
use std::future::Future;
use thiserror::Error;
use url::Url;

/// Error from an outbound call. Upstream HTTP error statuses are not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The HTTP client could not be built.
    #[error("failed to create client: {0}")]
    Client(String),
    /// The request could not be built or sent (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Request(String),
    /// The response body could not be read.
    #[error("failed to read response: {0}")]
    Body(String),
}

/// One outbound call: who to call, with what, and on whose behalf.
#[derive(Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub content_type: &'static str,
    pub body: String,
    /// Sent as `Authorization: Bearer <token>`.
    pub token: String,
}

impl fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("content_type", &self.content_type)
            .field("body_len", &self.body.len())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Status and full body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamResponse {
    /// Status line as reported to callers, e.g. `"200 OK"`.
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }
}

/// Performs one outbound request and returns the upstream status and body.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send {
        (**self).send(request)
    }
}
