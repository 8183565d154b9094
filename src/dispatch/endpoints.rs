use url::Url;

use super::DispatchError;
use crate::core::Country;

/// Revenue Ireland VAT3 declaration endpoint.
pub const DEFAULT_IRELAND_URL: &str = "https://api.revenue.ie/vat3/declaration";

/// Italian SdI exchange-platform SOAP endpoint (test environment).
pub const DEFAULT_SDI_URL: &str = "https://test.fatturapa.gov.it/sdi";

/// HMRC VAT API base (sandbox); returns go to `{base}/{vrn}/returns`.
pub const DEFAULT_HMRC_BASE_URL: &str = "https://test-api.service.hmrc.gov.uk/organisations/vat";

/// Target endpoints of the three jurisdictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub ireland: Url,
    pub sdi: Url,
    pub hmrc_base: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ireland: Url::parse(DEFAULT_IRELAND_URL).expect("valid default URL"),
            sdi: Url::parse(DEFAULT_SDI_URL).expect("valid default URL"),
            hmrc_base: Url::parse(DEFAULT_HMRC_BASE_URL).expect("valid default URL"),
        }
    }
}

impl Endpoints {
    /// URL a submission for `country` is posted to.
    ///
    /// For the UK the registration number is appended to the HMRC base as one
    /// percent-encoded path segment, followed by `returns`. A number that
    /// cannot stand as its own segment (empty, `.` or `..`) is refused.
    pub fn url_for(&self, country: Country, reg_num: &str) -> Result<Url, DispatchError> {
        match country {
            Country::Ireland => Ok(self.ireland.clone()),
            Country::Italy => Ok(self.sdi.clone()),
            Country::UnitedKingdom => {
                if matches!(reg_num, "" | "." | "..") {
                    return Err(DispatchError::Endpoint(format!(
                        "registration number '{reg_num}' is not a valid HMRC path segment"
                    )));
                }
                let mut url = self.hmrc_base.clone();
                url.path_segments_mut()
                    .map_err(|_| {
                        DispatchError::Endpoint(format!(
                            "HMRC base URL '{}' cannot take path segments",
                            self.hmrc_base
                        ))
                    })?
                    .pop_if_empty()
                    .push(reg_num)
                    .push("returns");
                Ok(url)
            }
        }
    }
}
