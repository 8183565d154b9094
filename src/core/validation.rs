use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::error::ValidationError;
use super::submission::VatSubmission;

/// Date format used for the period boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether `c` matches the XML 1.0 `Char` production.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Validate the generic (jurisdiction-independent) fields of a submission.
/// Returns all validation errors found (not just the first).
///
/// Country is already constrained by [`super::Country`]. The Ireland-only
/// optional fields are never required, but like all free text they must be
/// representable in XML.
pub fn validate_submission(submission: &VatSubmission) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    require(&submission.name, "name", &mut errors);
    if require(&submission.reg_num, "regnum", &mut errors)
        && matches!(submission.reg_num.as_str(), "." | "..")
    {
        errors.push(ValidationError::new(
            "regnum",
            format!("'{}' is not a registration number", submission.reg_num),
        ));
    }
    require(&submission.token, "token", &mut errors);

    // Free-text fields end up in XML documents verbatim.
    let texts = [
        (Some(&submission.name), "name"),
        (Some(&submission.reg_num), "regnum"),
        (submission.postponed_accounting.as_ref(), "postponedAccounting"),
        (submission.unusual_expenditure.as_ref(), "unusualExpenditure"),
        (submission.unusual_expenditure_amount.as_ref(), "unusualExpenditureAmt"),
        (submission.unusual_expenditure_detail.as_ref(), "unusualExpenditureDtl"),
    ];
    for (value, field) in texts {
        if let Some(c) = value.and_then(|v| v.chars().find(|c| !is_xml_char(*c))) {
            errors.push(ValidationError::new(
                field,
                format!("contains U+{:04X}, which XML does not allow", c as u32),
            ));
        }
    }

    let start = parse_date(&submission.start_date, "startdate", &mut errors);
    let end = parse_date(&submission.end_date, "enddate", &mut errors);
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.push(ValidationError::new(
                "enddate",
                format!("period end {end} is before period start {start}"),
            ));
        }
    }

    let amounts = [
        (&submission.sales, "sales"),
        (&submission.purchases, "purchs"),
        (&submission.goods_to, "goodsto"),
        (&submission.goods_from, "goodsfrom"),
        (&submission.services_to, "servicesto"),
        (&submission.services_from, "servicesfrom"),
    ];
    for (value, field) in amounts {
        parse_amount(value, field, &mut errors);
    }

    errors
}

fn require(value: &str, field: &str, errors: &mut Vec<ValidationError>) -> bool {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
        false
    } else {
        true
    }
}

/// Values are forwarded verbatim, so surrounding whitespace is an error
/// rather than something to trim away.
fn require_exact(value: &str, field: &str, errors: &mut Vec<ValidationError>) -> bool {
    if !require(value, field, errors) {
        return false;
    }
    if value.trim() != value {
        errors.push(ValidationError::new(
            field,
            format!("'{value}' has leading or trailing whitespace"),
        ));
        return false;
    }
    true
}

fn parse_date(value: &str, field: &str, errors: &mut Vec<ValidationError>) -> Option<NaiveDate> {
    if !require_exact(value, field, errors) {
        return None;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(ValidationError::new(
                field,
                format!("'{value}' is not a date in YYYY-MM-DD format"),
            ));
            None
        }
    }
}

fn parse_amount(value: &str, field: &str, errors: &mut Vec<ValidationError>) -> Option<Decimal> {
    if !require_exact(value, field, errors) {
        return None;
    }
    match Decimal::from_str(value) {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(ValidationError::new(
                field,
                format!("'{value}' is not a decimal amount"),
            ));
            None
        }
    }
}
