use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use super::RenderError;
use crate::core::is_xml_char;

fn xml_io(e: std::io::Error) -> RenderError {
    RenderError::Xml(e.to_string())
}

/// quick-xml escapes markup but writes control characters as-is.
fn check_chars(value: &str) -> Result<(), RenderError> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(RenderError::Xml(format!(
            "character U+{:04X} is not allowed in XML",
            c as u32
        ))),
        None => Ok(()),
    }
}

/// Thin indenting writer over `quick_xml::Writer` used by all XML renderers.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl std::fmt::Debug for XmlWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlWriter").finish_non_exhaustive()
    }
}

impl XmlWriter {
    /// Writer that starts with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_declaration(None)
    }

    /// Writer that starts with an XML declaration carrying an optional
    /// `standalone` value.
    pub fn with_declaration(standalone: Option<&str>) -> Result<Self, RenderError> {
        let mut w = Self::fragment();
        w.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), standalone)))
            .map_err(xml_io)?;
        Ok(w)
    }

    /// Writer without a declaration, for documents embedded in an envelope.
    pub fn fragment() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    pub fn into_string(self) -> Result<String, RenderError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| RenderError::Xml(format!("UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, RenderError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, RenderError> {
        self.writer
            .write_event(Event::Start(element(name, attrs)?))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// Write a self-closing element; attribute values are escaped.
    pub fn empty_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, RenderError> {
        self.writer
            .write_event(Event::Empty(element(name, attrs)?))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, RenderError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// Write a self-closing element without attributes.
    pub fn empty_element(&mut self, name: &str) -> Result<&mut Self, RenderError> {
        self.writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, RenderError> {
        check_chars(text)?;
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write `<name><![CDATA[content]]></name>`.
    ///
    /// `content` must not contain `]]>`; output of [`XmlWriter`] never does,
    /// since text and attribute escaping turn `>` into `&gt;`.
    pub fn cdata_element(&mut self, name: &str, content: &str) -> Result<&mut Self, RenderError> {
        if content.contains("]]>") {
            return Err(RenderError::Xml(
                "CDATA content must not contain ']]>'".into(),
            ));
        }
        check_chars(content)?;
        self.start_element(name)?;
        self.writer
            .write_event(Event::CData(BytesCData::new(content)))
            .map_err(xml_io)?;
        self.end_element(name)
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> Result<BytesStart<'a>, RenderError> {
    let mut elem = BytesStart::new(name);
    for (k, v) in attrs {
        check_chars(v)?;
        elem.push_attribute((*k, *v));
    }
    Ok(elem)
}

/// Format a Decimal for XML output: always include at least 2 decimal places,
/// strip trailing zeros beyond that.
pub fn format_decimal(d: Decimal) -> String {
    let s = d.normalize().to_string();
    if let Some(dot_pos) = s.find('.') {
        let decimals = s.len() - dot_pos - 1;
        if decimals < 2 {
            format!("{s}{}", "0".repeat(2 - decimals))
        } else {
            s
        }
    } else {
        format!("{s}.00")
    }
}
