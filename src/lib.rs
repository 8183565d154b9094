//! # govly
//!
//! One VAT-return payload, three tax authorities. A generic
//! [`VatSubmission`](core::VatSubmission) is rendered into the document each
//! jurisdiction expects and forwarded with the caller's bearer token:
//!
//! - **Ireland**: Revenue VAT3 XML declaration
//! - **Italy**: FatturaPA XML inside the SdI `submitInvoice` SOAP envelope
//! - **United Kingdom**: HMRC VAT return JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use govly::core::VatSubmission;
//! use govly::render::to_ireland_xml;
//!
//! let submission: VatSubmission = serde_json::from_str(r#"{
//!     "country": "IE", "name": "Acme", "regnum": "IE123",
//!     "startdate": "2024-01-01", "enddate": "2024-03-31",
//!     "sales": "1000", "purchs": "500", "goodsto": "0", "goodsfrom": "0",
//!     "servicesto": "0", "servicesfrom": "0", "token": "abc"
//! }"#).unwrap();
//!
//! assert!(govly::core::validate_submission(&submission).is_empty());
//! let xml = to_ireland_xml(&submission).unwrap();
//! assert!(xml.contains(r#"regnum="IE123""#));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `server` (default) | axum HTTP server, CLI configuration, logging setup |

pub mod core;
pub mod dispatch;
pub mod render;
pub mod transport;

#[cfg(feature = "server")]
pub mod server;
