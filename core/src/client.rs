//! Request builders for the Dienas API.
//!
//! # Design
//! `Api` holds a resolved key, the base URL and a shared transport, and never
//! changes after construction. Each resource method validates its inputs and
//! returns a `Request`; no network I/O happens until a format method is
//! called on that request.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate, TimeZone};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpTransport, UreqTransport};
use crate::request::Request;
use crate::types::Resource;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client factory for Dienas API requests.
#[derive(Clone)]
pub struct Api {
    key: String,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Create a client with `key`, or with the process-wide default key when
    /// `key` is `None` or empty.
    ///
    /// Fails with `ApiError::Configuration` when neither is available.
    pub fn new(key: Option<&str>) -> ApiResult<Self> {
        Self::with_config(ApiConfig::resolve(key)?)
    }

    /// Create a client from an explicit configuration. The process-wide
    /// default key is not consulted.
    pub fn with_config(config: ApiConfig) -> ApiResult<Self> {
        Self::with_config_and_transport(config, UreqTransport::new())
    }

    /// Like `with_config`, with a caller-supplied transport instead of the
    /// default ureq agent.
    pub fn with_config_and_transport(
        config: ApiConfig,
        transport: impl HttpTransport + 'static,
    ) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.normalized_base_url(),
            key: config.key,
            transport: Arc::new(transport),
        })
    }

    /// Replace the transport used by requests built from this client.
    #[must_use]
    pub fn with_transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, resource: Resource, params: Vec<(&'static str, Option<String>)>) -> Request {
        Request::new(
            resource,
            &self.key,
            params,
            self.base_url.clone(),
            Arc::clone(&self.transport),
        )
    }

    /// Today's name days.
    pub fn namedays(&self) -> Request {
        self.request(Resource::Namedays, Vec::new())
    }

    /// Name days for `month`-`day`.
    ///
    /// The values are sent as given, without zero-padding or calendar checks.
    pub fn namedays_for_date(&self, month: i32, day: i32) -> Request {
        self.request(Resource::Namedays, vec![("date", Some(format!("{month}-{day}")))])
    }

    pub fn banks(&self, language: Option<&str>) -> Request {
        self.request(Resource::Banks, vec![("lang", language.map(str::to_string))])
    }

    pub fn countries(&self, language: Option<&str>) -> Request {
        self.request(Resource::Countries, vec![("lang", language.map(str::to_string))])
    }

    /// Exchange rates for the local calendar day containing the Unix
    /// timestamp `date`, or for the server's current day when `None`.
    pub fn currency_rates(&self, date: Option<i64>) -> ApiResult<Request> {
        let date = date.map(local_date).transpose()?;
        Ok(self.request(Resource::CurrencyRates, vec![("date", date)]))
    }

    /// Like `currency_rates`, for a timestamp held as text.
    ///
    /// Fails with `ApiError::InvalidArgument` unless `date` is an integer.
    pub fn currency_rates_str(&self, date: &str) -> ApiResult<Request> {
        let timestamp = date.parse::<i64>().map_err(|_| {
            ApiError::invalid_argument(format!("date must be an integer timestamp, got {date:?}"))
        })?;
        self.currency_rates(Some(timestamp))
    }

    /// Exchange rates for a calendar date.
    pub fn currency_rates_on(&self, date: NaiveDate) -> Request {
        self.request(
            Resource::CurrencyRates,
            vec![("date", Some(date.format(DATE_FORMAT).to_string()))],
        )
    }
}

/// Render a Unix timestamp as `YYYY-MM-DD` in the local time zone.
fn local_date(timestamp: i64) -> ApiResult<String> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .ok_or_else(|| {
            ApiError::invalid_argument(format!("timestamp {timestamp} is out of range"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::TransportError;
    use crate::types::Format;

    fn offline(_: &str) -> Result<String, TransportError> {
        panic!("no network call expected")
    }

    fn client() -> Api {
        Api::with_config_and_transport(
            ApiConfig::new("k3y").with_base_url("http://localhost:3000"),
            offline,
        )
        .unwrap()
    }

    #[test]
    fn explicit_key_reaches_query_string() {
        let api = Api::new(Some("my key")).unwrap().with_transport(offline);
        assert_eq!(api.key(), "my key");
        assert_eq!(api.namedays().param("key"), Some("my key"));
        assert_eq!(api.namedays().query_string(), "key=my+key");
    }

    #[test]
    fn namedays_has_only_key() {
        let req = client().namedays();
        assert_eq!(req.resource(), Resource::Namedays);
        assert_eq!(req.url(Format::Json), "http://localhost:3000/namedays.json?key=k3y");
    }

    #[test]
    fn namedays_for_date_is_not_padded() {
        let req = client().namedays_for_date(12, 31);
        assert_eq!(req.query_string(), "key=k3y&date=12-31");

        let req = client().namedays_for_date(1, 5);
        assert_eq!(req.param("date"), Some("1-5"));
    }

    #[test]
    fn namedays_for_date_passes_nonsense_through() {
        assert_eq!(client().namedays_for_date(13, 0).param("date"), Some("13-0"));
        assert_eq!(client().namedays_for_date(-1, 99).param("date"), Some("-1-99"));
    }

    #[test]
    fn banks_without_language_omits_lang() {
        let req = client().banks(None);
        assert_eq!(req.resource(), Resource::Banks);
        assert_eq!(req.query_string(), "key=k3y");
        assert!(!req.query_string().contains("lang"));
    }

    #[test]
    fn banks_with_language() {
        assert_eq!(client().banks(Some("en")).query_string(), "key=k3y&lang=en");
    }

    #[test]
    fn countries_language_handling() {
        let req = client().countries(Some("lv"));
        assert_eq!(req.url(Format::Xml), "http://localhost:3000/countries.xml?key=k3y&lang=lv");
        assert_eq!(client().countries(None).query_string(), "key=k3y");
    }

    #[test]
    fn currency_rates_without_date() {
        let req = client().currency_rates(None).unwrap();
        assert_eq!(req.resource(), Resource::CurrencyRates);
        assert_eq!(req.url(Format::Json), "http://localhost:3000/currencyrates.json?key=k3y");
    }

    #[test]
    fn currency_rates_renders_local_date() {
        let ts = Local
            .with_ymd_and_hms(2020, 1, 15, 0, 0, 0)
            .single()
            .unwrap()
            .timestamp();
        let req = client().currency_rates(Some(ts)).unwrap();
        assert!(req.query_string().contains("date=2020-01-15"));
    }

    #[test]
    fn currency_rates_str_rejects_non_integers() {
        for bad in ["not-an-int", "", "12.5", "1e9"] {
            let err = client().currency_rates_str(bad).unwrap_err();
            assert!(matches!(err, ApiError::InvalidArgument(_)), "{bad}");
        }
    }

    #[test]
    fn currency_rates_str_accepts_integers() {
        let ts = Local
            .with_ymd_and_hms(2021, 6, 30, 12, 0, 0)
            .single()
            .unwrap()
            .timestamp();
        let req = client().currency_rates_str(&ts.to_string()).unwrap();
        assert_eq!(req.param("date"), Some("2021-06-30"));
    }

    #[test]
    fn currency_rates_out_of_range_timestamp() {
        let err = client().currency_rates(Some(i64::MAX)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn currency_rates_on_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 7).unwrap();
        assert_eq!(client().currency_rates_on(date).param("date"), Some("2019-03-07"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Api::with_config(ApiConfig::new("k").with_base_url("localhost")).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn supplied_transport_serves_requests() {
        let api = Api::with_config_and_transport(ApiConfig::new("k3y"), |url: &str| {
            Ok::<_, TransportError>(format!("[\"{url}\"]"))
        })
        .unwrap();
        let body = api.banks(Some("en")).as_parsed().unwrap();
        assert_eq!(body[0], "http://api.dienas.lv/banks.json?key=k3y&lang=en");
    }

    #[test]
    fn supplied_transport_does_not_skip_validation() {
        let err = Api::with_config_and_transport(ApiConfig::new(""), offline).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn clones_share_key_and_base_url() {
        let api = client();
        let copy = api.clone();
        assert_eq!(copy.key(), api.key());
        assert_eq!(copy.base_url(), "http://localhost:3000/");
    }
}
