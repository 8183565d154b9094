use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::UnsupportedCountry;

/// Jurisdiction a submission is filed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Country {
    /// Revenue (Ireland), VAT3 XML declaration.
    #[serde(rename = "IE")]
    Ireland,
    /// HMRC (United Kingdom), VAT return JSON API.
    #[serde(rename = "UK")]
    UnitedKingdom,
    /// Agenzia delle Entrate (Italy), FatturaPA via the SdI exchange.
    #[serde(rename = "IT")]
    Italy,
}

impl Country {
    /// All supported jurisdictions.
    pub const ALL: [Country; 3] = [Country::Ireland, Country::UnitedKingdom, Country::Italy];

    /// Wire code accepted in the `country` field.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ireland => "IE",
            Self::UnitedKingdom => "UK",
            Self::Italy => "IT",
        }
    }

    /// Name of the receiving tax authority, used in logs and error messages.
    pub fn authority(self) -> &'static str {
        match self {
            Self::Ireland => "Revenue Ireland",
            Self::UnitedKingdom => "HMRC",
            Self::Italy => "SdI",
        }
    }

    /// Prefix of the `<key>_status` / `<key>_response` fields that tell a
    /// caller which pipeline answered.
    pub fn response_key(self) -> &'static str {
        match self {
            Self::Ireland => "revenue",
            Self::UnitedKingdom => "hmrc",
            Self::Italy => "sdi",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = UnsupportedCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IE" => Ok(Self::Ireland),
            "UK" => Ok(Self::UnitedKingdom),
            "IT" => Ok(Self::Italy),
            _ => Err(UnsupportedCountry { code: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Country {
    type Error = UnsupportedCountry;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One VAT return as received from a client.
///
/// Amounts are carried as strings and forwarded verbatim; [`super::validate_submission`]
/// checks that they parse as decimals and that the period dates are ISO dates.
/// The bearer `token` is never serialized and is redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct VatSubmission {
    pub country: Country,
    pub name: String,
    #[serde(rename = "regnum")]
    pub reg_num: String,
    #[serde(rename = "startdate")]
    pub start_date: String,
    #[serde(rename = "enddate")]
    pub end_date: String,
    pub sales: String,
    #[serde(rename = "purchs")]
    pub purchases: String,
    #[serde(rename = "goodsto")]
    pub goods_to: String,
    #[serde(rename = "goodsfrom")]
    pub goods_from: String,
    #[serde(rename = "servicesto")]
    pub services_to: String,
    #[serde(rename = "servicesfrom")]
    pub services_from: String,

    // Ireland-only fields.
    #[serde(
        rename = "postponedAccounting",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub postponed_accounting: Option<String>,
    #[serde(
        rename = "unusualExpenditure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unusual_expenditure: Option<String>,
    #[serde(
        rename = "unusualExpenditureAmt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unusual_expenditure_amount: Option<String>,
    #[serde(
        rename = "unusualExpenditureDtl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unusual_expenditure_detail: Option<String>,

    #[serde(skip_serializing)]
    pub token: String,
}

impl fmt::Debug for VatSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VatSubmission")
            .field("country", &self.country)
            .field("name", &self.name)
            .field("reg_num", &self.reg_num)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("sales", &self.sales)
            .field("purchases", &self.purchases)
            .field("goods_to", &self.goods_to)
            .field("goods_from", &self.goods_from)
            .field("services_to", &self.services_to)
            .field("services_from", &self.services_from)
            .field("postponed_accounting", &self.postponed_accounting)
            .field("unusual_expenditure", &self.unusual_expenditure)
            .field("unusual_expenditure_amount", &self.unusual_expenditure_amount)
            .field("unusual_expenditure_detail", &self.unusual_expenditure_detail)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "country": "IE",
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

    #[test]
    fn country_codes() {
        assert_eq!("IE".parse::<Country>().unwrap(), Country::Ireland);
        assert_eq!("UK".parse::<Country>().unwrap(), Country::UnitedKingdom);
        assert_eq!("IT".parse::<Country>().unwrap(), Country::Italy);
        for code in ["uk", " IT ", "Ie", "GB", "IR", ""] {
            assert!(code.parse::<Country>().is_err(), "{code:?}");
        }
        let err = "XX".parse::<Country>().unwrap_err();
        assert_eq!(err.code, "XX");
        assert_eq!(err.to_string(), "Unsupported country 'XX'");
    }

    #[test]
    fn country_round_trips_its_code() {
        for country in Country::ALL {
            assert_eq!(country.code().parse::<Country>().unwrap(), country);
        }
    }

    #[test]
    fn deserializes_wire_names() {
        let s: VatSubmission = serde_json::from_value(sample()).unwrap();
        assert_eq!(s.country, Country::Ireland);
        assert_eq!(s.reg_num, "IE123");
        assert_eq!(s.purchases, "500");
        assert_eq!(s.token, "abc");
        assert!(s.postponed_accounting.is_none());
    }

    #[test]
    fn unsupported_country_fails_deserialization() {
        let mut v = sample();
        v["country"] = json!("XX");
        let err = serde_json::from_value::<VatSubmission>(v).unwrap_err();
        assert!(err.to_string().contains("Unsupported country"));
    }

    #[test]
    fn padded_country_fails_deserialization() {
        let mut v = sample();
        v["country"] = json!(" ie ");
        let err = serde_json::from_value::<VatSubmission>(v).unwrap_err();
        assert!(err.to_string().contains("Unsupported country ' ie '"));
    }

    #[test]
    fn missing_token_fails_deserialization() {
        let mut v = sample();
        v.as_object_mut().unwrap().remove("token");
        assert!(serde_json::from_value::<VatSubmission>(v).is_err());
    }

    #[test]
    fn token_is_not_serialized() {
        let s: VatSubmission = serde_json::from_value(sample()).unwrap();
        let out = serde_json::to_string(&s).unwrap();
        assert!(!out.contains("token"));
        assert!(!out.contains("abc"));
        assert!(out.contains("\"regnum\":\"IE123\""));
        assert!(!out.contains("postponedAccounting"));
    }

    #[test]
    fn debug_redacts_token() {
        let mut v = sample();
        v["token"] = json!("super-secret-token");
        let s: VatSubmission = serde_json::from_value(v).unwrap();
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("super-secret-token"));
        assert!(dbg.contains("<redacted>"));
    }
}
