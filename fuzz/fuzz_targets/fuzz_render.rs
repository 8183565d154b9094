#![no_main]

use govly::core::{Country, VatSubmission, is_xml_char};
use libfuzzer_sys::fuzz_target;
use quick_xml::Reader;
use quick_xml::events::Event;

fn assert_well_formed(xml: &str) {
    // The reader accepts characters outside the XML `Char` production.
    if let Some(c) = xml.chars().find(|c| !is_xml_char(*c)) {
        panic!("renderer emitted U+{:04X}\n{xml}", c as u32);
    }
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("renderer produced malformed XML: {e}\n{xml}"),
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Arbitrary field values: text either renders to well-formed XML or is
    // refused for carrying a character XML cannot hold.
    let representable = s.chars().all(is_xml_char);
    let mut parts = s.split('|').map(str::to_string);
    let mut next = || parts.next().unwrap_or_default();
    let submission = VatSubmission {
        country: Country::Ireland,
        name: next(),
        reg_num: next(),
        start_date: next(),
        end_date: next(),
        sales: next(),
        purchases: next(),
        goods_to: next(),
        goods_from: next(),
        services_to: next(),
        services_from: next(),
        postponed_accounting: Some(next()),
        unusual_expenditure: Some(next()),
        unusual_expenditure_amount: Some(next()),
        unusual_expenditure_detail: Some(next()),
        token: next(),
    };

    match govly::render::to_ireland_xml(&submission) {
        Ok(xml) => assert_well_formed(&xml),
        Err(e) => assert!(!representable, "Ireland failed on XML-safe input: {e}"),
    }

    match govly::render::to_italy_xml(&submission) {
        Ok(invoice) => {
            assert_well_formed(&invoice);
            let envelope = govly::render::wrap_in_soap_envelope(&invoice).expect("envelope renders");
            assert_well_formed(&envelope);
        }
        Err(e) => assert!(!representable, "Italy failed on XML-safe input: {e}"),
    }

    let _ = govly::render::to_uk_json(&submission).expect("UK renders");
});
