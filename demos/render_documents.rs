use govly::core::{Country, VatSubmission, validate_submission};
use govly::render;

fn main() {
    let mut submission = VatSubmission {
        country: Country::Ireland,
        name: "Acme Trading Ltd".into(),
        reg_num: "IE1234567T".into(),
        start_date: "2024-01-01".into(),
        end_date: "2024-02-29".into(),
        sales: "12500.00".into(),
        purchases: "4300.10".into(),
        goods_to: "0".into(),
        goods_from: "0".into(),
        services_to: "0".into(),
        services_from: "0".into(),
        postponed_accounting: Some("0".into()),
        unusual_expenditure: None,
        unusual_expenditure_amount: None,
        unusual_expenditure_detail: None,
        token: "demo-token".into(),
    };

    let errors = validate_submission(&submission);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("invalid: {e}");
        }
        std::process::exit(1);
    }

    for country in Country::ALL {
        submission.country = country;
        match render::render_document(&submission) {
            Ok(doc) => {
                println!("=== {} ({}) {} ===\n", country, country.authority(), doc.content_type);
                println!("{}\n", doc.body);
            }
            Err(e) => eprintln!("{country}: render failed: {e}"),
        }
    }
}
