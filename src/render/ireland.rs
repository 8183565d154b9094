use super::RenderError;
use super::xml_utils::XmlWriter;
use crate::core::VatSubmission;

/// Root element of a Revenue VAT3 declaration.
pub const VAT3_ELEMENT: &str = "VAT3";

/// Generate the Revenue Ireland VAT3 declaration for a submission.
///
/// The document is a single self-closing `VAT3` element. Submission values
/// are copied verbatim into attributes; absent Ireland-only fields render as
/// empty attributes, since the VAT3 schema requires them to be present.
pub fn to_ireland_xml(submission: &VatSubmission) -> Result<String, RenderError> {
    let opt = |v: &Option<String>| v.as_deref().unwrap_or("").to_owned();
    let postponed = opt(&submission.postponed_accounting);
    let unusual = opt(&submission.unusual_expenditure);
    let unusual_amt = opt(&submission.unusual_expenditure_amount);
    let unusual_dtl = opt(&submission.unusual_expenditure_detail);

    let mut w = XmlWriter::with_declaration(Some("yes"))?;
    w.empty_element_with_attrs(
        VAT3_ELEMENT,
        &[
            ("currency", "E"),
            ("name", &submission.name),
            ("regnum", &submission.reg_num),
            ("startdate", &submission.start_date),
            ("enddate", &submission.end_date),
            ("sales", &submission.sales),
            ("purchs", &submission.purchases),
            ("goodsto", &submission.goods_to),
            ("goodsfrom", &submission.goods_from),
            ("servicesto", &submission.services_to),
            ("servicesfrom", &submission.services_from),
            ("type", "0"),
            ("filefreq", "0"),
            ("formversion", "1"),
            ("language", "E"),
            ("postponedAccounting", &postponed),
            ("unusualExpenditure", &unusual),
            ("unusualExpenditureAmt", &unusual_amt),
            ("unusualExpenditureDtl", &unusual_dtl),
        ],
    )?;
    w.into_string()
}
