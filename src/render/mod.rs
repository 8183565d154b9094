//! Jurisdiction document renderers.
//!
//! Each renderer is a pure function of a [`VatSubmission`]: no I/O, no
//! clock, no hidden state, so rendering the same submission twice yields
//! byte-identical output.
//!
//! | Country | Renderer | Transport body | Content-Type |
//! |---------|----------|----------------|--------------|
//! | `IE` | [`to_ireland_xml`] | VAT3 XML | `application/xml` |
//! | `IT` | [`to_italy_xml`] | FatturaPA XML in a SOAP envelope ([`wrap_in_soap_envelope`]) | `text/xml` |
//! | `UK` | [`to_uk_json`] | submission JSON | `application/json` |
//!
//! # Example
//!
//! ```no_run
//! use govly::core::VatSubmission;
//! use govly::render;
//!
//! let submission: VatSubmission = todo!(); // deserialized from a client request
//! let document = render::render_document(&submission).unwrap();
//! println!("{} ({} bytes)", document.content_type, document.body.len());
//! ```

mod ireland;
mod italy;
mod soap;
mod uk;
pub(crate) mod xml_utils;

pub use ireland::{VAT3_ELEMENT, to_ireland_xml};
pub use italy::to_italy_xml;
pub use soap::wrap_in_soap_envelope;
pub use uk::to_uk_json;

use thiserror::Error;

use crate::core::{Country, VatSubmission};

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// XML writer failure.
    #[error("XML error: {0}")]
    Xml(String),

    /// The submission could not be serialized to JSON.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// FatturaPA constants.
pub mod fatturapa {
    /// Schema version written to `FatturaElettronica/@versione`.
    pub const VERSION: &str = "1.2";
    /// Default namespace of the FatturaPA 1.2 schema.
    pub const NAMESPACE: &str = "http://ivaservizi.agenziaentrate.gov.it/docs/xsd/fatture/v1.2";
    /// `TipoDocumento` for an ordinary invoice.
    pub const DOCUMENT_TYPE: &str = "TD01";
    /// `Divisa` of every document.
    pub const CURRENCY: &str = "EUR";
    /// `IdPaese` of the seller.
    pub const SELLER_COUNTRY: &str = "IT";
    /// `IdPaese` of the buyer. Always Italy.
    pub const BUYER_COUNTRY: &str = "IT";
    /// `Numero` written until an invoice sequence is supplied by the caller.
    pub const PLACEHOLDER_INVOICE_NUMBER: &str = "12345";
}

/// Namespaces of the SdI SOAP transport.
pub mod sdi_ns {
    pub const SOAP_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
    pub const SDI: &str = "http://www.fatturapa.gov.it/sdi";
}

/// `Content-Type` values of the outbound bodies.
pub mod content_type {
    pub const XML: &str = "application/xml";
    pub const SOAP: &str = "text/xml";
    pub const JSON: &str = "application/json";
}

/// A document ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `Content-Type` header value.
    pub content_type: &'static str,
    /// Request body.
    pub body: String,
}

/// Render a submission into the body its jurisdiction expects on the wire.
///
/// Italy's invoice is wrapped in the SdI SOAP envelope here; Ireland and the
/// UK are sent as rendered.
pub fn render_document(submission: &VatSubmission) -> Result<Document, RenderError> {
    let document = match submission.country {
        Country::Ireland => Document {
            content_type: content_type::XML,
            body: to_ireland_xml(submission)?,
        },
        Country::Italy => Document {
            content_type: content_type::SOAP,
            body: wrap_in_soap_envelope(&to_italy_xml(submission)?)?,
        },
        Country::UnitedKingdom => Document {
            content_type: content_type::JSON,
            body: to_uk_json(submission)?,
        },
    };
    Ok(document)
}
