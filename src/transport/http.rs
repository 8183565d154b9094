use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};

use super::{OutboundRequest, Transport, TransportError, UpstreamResponse};

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// The client is built once and cloned cheaply; connection pooling is
/// reqwest's default. No retries are attempted.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport. `timeout` bounds each whole request; `None` keeps
    /// reqwest's default (no timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, TransportError> {
        let started = Instant::now();
        let OutboundRequest {
            method,
            url,
            content_type,
            body,
            token,
        } = request;

        tracing::debug!(%method, %url, content_type, body_len = body.len(), "sending upstream request");

        let resp = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, content_type)
            .bearer_auth(token)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        tracing::debug!(
            %status,
            body_len = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream responded"
        );

        Ok(UpstreamResponse { status, body })
    }
}
