#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use govly::core::{Country, VatSubmission, is_xml_char};
use govly::transport::{OutboundRequest, Transport, TransportError, UpstreamResponse};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest::StatusCode;

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// The Irish submission used throughout the end-to-end scenarios.
pub fn ireland() -> VatSubmission {
    VatSubmission {
        country: Country::Ireland,
        name: "Acme".into(),
        reg_num: "IE123".into(),
        start_date: "2024-01-01".into(),
        end_date: "2024-03-31".into(),
        sales: "1000".into(),
        purchases: "500".into(),
        goods_to: "0".into(),
        goods_from: "0".into(),
        services_to: "0".into(),
        services_from: "0".into(),
        postponed_accounting: None,
        unusual_expenditure: None,
        unusual_expenditure_amount: None,
        unusual_expenditure_detail: None,
        token: "abc".into(),
    }
}

pub fn italy() -> VatSubmission {
    VatSubmission {
        country: Country::Italy,
        name: "Rossi S.r.l.".into(),
        reg_num: "01234567890".into(),
        sales: "1220".into(),
        token: "it-token".into(),
        ..ireland()
    }
}

pub fn uk() -> VatSubmission {
    VatSubmission {
        country: Country::UnitedKingdom,
        name: "Widgets Ltd".into(),
        reg_num: "123456789".into(),
        token: "uk-token".into(),
        ..ireland()
    }
}

pub fn submission_json(country: &str) -> serde_json::Value {
    serde_json::json!({
        "country": country,
        "name": "Acme",
        "regnum": "IE123",
        "startdate": "2024-01-01",
        "enddate": "2024-03-31",
        "sales": "1000",
        "purchs": "500",
        "goodsto": "0",
        "goodsfrom": "0",
        "servicesto": "0",
        "servicesfrom": "0",
        "token": "abc"
    })
}

// ---------------------------------------------------------------------------
// Recording transport
// ---------------------------------------------------------------------------

/// Transport that records every request instead of touching the network.
pub struct RecordingTransport {
    calls: AtomicUsize,
    requests: Mutex<Vec<OutboundRequest>>,
    outcome: Result<(StatusCode, String), String>,
}

impl RecordingTransport {
    pub fn answering(status: StatusCode, body: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            outcome: Ok((status, body.to_string())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> OutboundRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        match &self.outcome {
            Ok((status, body)) => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            Err(message) => Err(TransportError::Request(message.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// XML inspection
// ---------------------------------------------------------------------------

/// Well-formedness including the XML `Char` production, which quick-xml's
/// reader does not enforce.
pub fn strictly_well_formed(xml: &str) -> Result<(), String> {
    if let Some(c) = xml.chars().find(|c| !is_xml_char(*c)) {
        return Err(format!("U+{:04X} is not an XML character", c as u32));
    }
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => {
                roots += usize::from(depth == 0);
                depth += 1;
                check_attributes(&e)?;
            }
            Event::Empty(e) => {
                roots += usize::from(depth == 0);
                check_attributes(&e)?;
            }
            Event::End(_) => depth -= 1,
            Event::Text(t) => {
                t.unescape().map_err(|e| e.to_string())?;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if depth != 0 || roots != 1 {
        return Err(format!("{roots} root elements, {depth} left open"));
    }
    Ok(())
}

fn check_attributes(e: &BytesStart<'_>) -> Result<(), String> {
    for a in e.attributes() {
        a.map_err(|e| e.to_string())?
            .unescape_value()
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Names of all top-level elements, plus the attributes of the first one.
/// Panics if the document is not well-formed.
pub fn root_elements(xml: &str) -> (Vec<String>, Vec<(String, String)>) {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;
    let mut depth = 0usize;
    let mut roots = Vec::new();
    let mut attrs = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => {
                if depth == 0 {
                    record_root(&e, &mut roots, &mut attrs);
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    record_root(&e, &mut roots, &mut attrs);
                }
            }
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
    }
    assert_eq!(depth, 0, "unbalanced document");
    (roots, attrs)
}

fn record_root(
    e: &BytesStart<'_>,
    roots: &mut Vec<String>,
    attrs: &mut Vec<(String, String)>,
) {
    if roots.is_empty() {
        for a in e.attributes() {
            let a = a.expect("valid attribute");
            attrs.push((
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                a.unescape_value().unwrap().into_owned(),
            ));
        }
    }
    roots.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap());
}

/// `(path, text)` for every text node inside an element, where `path` is the
/// slash-joined element names from the root. Whitespace between elements is
/// skipped. Panics if the document is not well-formed.
pub fn leaf_texts(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;
    let mut path: Vec<String> = Vec::new();
    let mut out = Vec::new();
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) => path.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap()),
            Event::End(_) => {
                path.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                let indentation = text.trim().is_empty() && text.contains('\n');
                if !path.is_empty() && !indentation {
                    out.push((path.join("/"), text));
                }
            }
            Event::CData(c) => {
                out.push((path.join("/"), String::from_utf8(c.into_inner().into_owned()).unwrap()));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

/// Text of the first node at `path`, if any.
pub fn text_at(xml: &str, path: &str) -> Option<String> {
    leaf_texts(xml)
        .into_iter()
        .find(|(p, _)| p == path)
        .map(|(_, t)| t)
}
