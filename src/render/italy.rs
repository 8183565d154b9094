use rust_decimal::Decimal;
use std::str::FromStr;

use super::RenderError;
use super::xml_utils::{XmlWriter, format_decimal};
use super::fatturapa;
use crate::core::VatSubmission;

/// Generate a FatturaPA 1.2 electronic invoice for a submission.
///
/// The submission carries only one party, so the buyer
/// (`CessionarioCommittente`) repeats the seller's identity with country
/// `IT`, and the invoice number is [`fatturapa::PLACEHOLDER_INVOICE_NUMBER`].
/// The sales amount becomes `ImportoTotaleDocumento`, formatted with at least
/// two decimals when it parses as a number and copied verbatim otherwise.
pub fn to_italy_xml(submission: &VatSubmission) -> Result<String, RenderError> {
    let total = Decimal::from_str(&submission.sales)
        .map(format_decimal)
        .unwrap_or_else(|_| submission.sales.clone());

    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs(
        "FatturaElettronica",
        &[
            ("versione", fatturapa::VERSION),
            ("xmlns", fatturapa::NAMESPACE),
        ],
    )?;

    w.start_element("FatturaElettronicaHeader")?;
    write_party(
        &mut w,
        "CedentePrestatore",
        fatturapa::SELLER_COUNTRY,
        &submission.reg_num,
        &submission.name,
    )?;
    write_party(
        &mut w,
        "CessionarioCommittente",
        fatturapa::BUYER_COUNTRY,
        &submission.reg_num,
        &submission.name,
    )?;
    w.end_element("FatturaElettronicaHeader")?;

    w.start_element("FatturaElettronicaBody")?;
    w.start_element("DatiGenerali")?;
    w.start_element("DatiGeneraliDocumento")?;
    w.text_element("TipoDocumento", fatturapa::DOCUMENT_TYPE)?;
    w.text_element("Divisa", fatturapa::CURRENCY)?;
    w.text_element("Data", &submission.start_date)?;
    w.text_element("Numero", fatturapa::PLACEHOLDER_INVOICE_NUMBER)?;
    w.text_element("ImportoTotaleDocumento", &total)?;
    w.end_element("DatiGeneraliDocumento")?;
    w.end_element("DatiGenerali")?;
    w.end_element("FatturaElettronicaBody")?;

    w.end_element("FatturaElettronica")?;
    w.into_string()
}

fn write_party(
    w: &mut XmlWriter,
    role: &str,
    country: &str,
    vat_code: &str,
    name: &str,
) -> Result<(), RenderError> {
    w.start_element(role)?;
    w.start_element("IdFiscaleIVA")?;
    w.text_element("IdPaese", country)?;
    w.text_element("IdCodice", vat_code)?;
    w.end_element("IdFiscaleIVA")?;
    w.text_element("Denominazione", name)?;
    w.end_element(role)?;
    Ok(())
}
