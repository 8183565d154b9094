//! Country dispatch: validate, render, send, tag the answer.
//!
//! [`Dispatcher::submit`] makes exactly one outbound call per valid
//! submission and none for an invalid one.

mod endpoints;

pub use endpoints::{
    DEFAULT_HMRC_BASE_URL, DEFAULT_IRELAND_URL, DEFAULT_SDI_URL, Endpoints,
};

use reqwest::{Method, StatusCode};
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::core::{Country, ValidationError, VatSubmission, join_validation_errors, validate_submission};
use crate::render::{self, RenderError};
use crate::transport::{OutboundRequest, Transport, TransportError};

/// Errors that can occur while dispatching a submission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// One or more generic fields failed validation; nothing was sent.
    #[error("validation failed: {}", join_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The submission could not be serialized to JSON.
    #[error("Failed to encode JSON: {0}")]
    Serialization(serde_json::Error),

    /// The XML document could not be written.
    #[error("Failed to render document: {0}")]
    Render(String),

    /// The target URL could not be built from the configured endpoint.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    /// The outbound call failed before an upstream status was received.
    #[error("Failed to send request to {authority}: {source}")]
    Transport {
        authority: &'static str,
        #[source]
        source: TransportError,
    },
}

impl DispatchError {
    /// Whether the caller is at fault (HTTP 4xx) rather than this service or
    /// the network (HTTP 5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<RenderError> for DispatchError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Json(e) => Self::Serialization(e),
            other => Self::Render(other.to_string()),
        }
    }
}

/// Upstream answer tagged with the jurisdiction that produced it.
///
/// Serializes as `{"<key>_status": "200 OK", "<key>_response": "..."}` with
/// `<key>` from [`Country::response_key`]. Upstream 4xx/5xx statuses are
/// reported here too; they are not dispatch errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub country: Country,
    pub status: StatusCode,
    pub body: String,
}

impl Serialize for Submitted {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.country.response_key();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&format!("{key}_status"), &self.status.to_string())?;
        map.serialize_entry(&format!("{key}_response"), &self.body)?;
        map.end()
    }
}

/// Routes submissions to their tax authority over a [`Transport`].
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Validate and render a submission into the request that would be sent,
    /// without sending it.
    pub fn prepare(&self, submission: &VatSubmission) -> Result<OutboundRequest, DispatchError> {
        let errors = validate_submission(submission);
        if !errors.is_empty() {
            return Err(DispatchError::Validation(errors));
        }

        let document = render::render_document(submission)?;
        let url = self
            .endpoints
            .url_for(submission.country, &submission.reg_num)?;

        Ok(OutboundRequest {
            method: Method::POST,
            url,
            content_type: document.content_type,
            body: document.body,
            token: submission.token.clone(),
        })
    }

    /// Send a submission to its tax authority.
    #[tracing::instrument(skip_all, fields(country = %submission.country))]
    pub async fn submit(&self, submission: &VatSubmission) -> Result<Submitted, DispatchError> {
        let request = match self.prepare(submission) {
            Ok(r) => r,
            Err(e) => {
                tracing::info!(error = %e, "submission rejected before transport");
                return Err(e);
            }
        };

        let authority = submission.country.authority();
        tracing::info!(authority, url = %request.url, "forwarding submission");

        let response = self.transport.send(request).await.map_err(|source| {
            tracing::warn!(authority, error = %source, "upstream call failed");
            DispatchError::Transport { authority, source }
        })?;

        tracing::info!(authority, status = %response.status, "upstream answered");
        Ok(Submitted {
            country: submission.country,
            status: response.status,
            body: response.body,
        })
    }
}
