use super::RenderError;
use crate::core::VatSubmission;

/// Serialize a submission to the JSON body sent to HMRC.
///
/// This is the submission's own serde form: wire field names, absent
/// optional fields omitted, bearer token excluded.
pub fn to_uk_json(submission: &VatSubmission) -> Result<String, RenderError> {
    Ok(serde_json::to_string(submission)?)
}
