//! Canonical VAT submission model and generic validation.
//!
//! A [`VatSubmission`] is the jurisdiction-independent request every client
//! sends; [`Country`] selects which tax authority receives it.

mod error;
mod submission;
mod validation;

pub use error::*;
pub use submission::*;
pub use validation::*;
