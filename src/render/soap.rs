use super::RenderError;
use super::sdi_ns;
use super::xml_utils::XmlWriter;

/// Wrap a rendered FatturaPA document in the SdI `submitInvoice` SOAP envelope.
///
/// The invoice travels as a CDATA block inside `xmlPayload`, so it reaches
/// the exchange platform byte-for-byte.
pub fn wrap_in_soap_envelope(invoice_xml: &str) -> Result<String, RenderError> {
    let mut w = XmlWriter::fragment();
    w.start_element_with_attrs("soapenv:Envelope", &[("xmlns:soapenv", sdi_ns::SOAP_ENVELOPE)])?;
    w.empty_element("soapenv:Header")?;
    w.start_element("soapenv:Body")?;
    w.start_element_with_attrs("submitInvoice", &[("xmlns", sdi_ns::SDI)])?;
    w.cdata_element("xmlPayload", invoice_xml)?;
    w.end_element("submitInvoice")?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;
    w.into_string()
}
