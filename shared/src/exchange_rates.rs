//! Client for the exchange-rate timeseries API (apilayer `exchangerates_data`).

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::api::classify_response;
use crate::error::FetchError;

const API_NAME: &str = "exchange_rates";

/// Timeseries payload:
///
/// ```json
/// {
///   "success": true,
///   "timeseries": true,
///   "start_date": "2012-05-01",
///   "end_date": "2012-05-03",
///   "base": "EUR",
///   "rates": {
///     "2012-05-01": { "USD": 1.322891, "AUD": 1.278047 },
///     "2012-05-02": { "USD": 1.315066, "AUD": 1.274202 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesPayload {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub base: String,
    /// day -> target currency -> rate
    #[serde(default)]
    pub rates: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone)]
pub struct ExchangeRatesClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ExchangeRatesClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|source| FetchError::Transport { api: API_NAME, source })?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn timeseries_url(&self) -> String {
        format!("{}/timeseries", self.base_url.trim_end_matches('/'))
    }

    /// Fetch the rates of `targets` against `base` for every day in
    /// `start..=end`. The provider caps a single call at 365 days.
    pub async fn fetch_timeseries(
        &self,
        base: &str,
        targets: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeseriesPayload, FetchError> {
        let url = self.timeseries_url();
        let query = [
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
            ("base", base.to_string()),
            ("symbols", targets.join(",")),
        ];
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { api: API_NAME, source })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { api: API_NAME, source })?;

        parse_timeseries_response(status, &body)
    }
}

/// Classify a raw timeseries response. Besides the shared envelope checks the
/// payload has to carry `"success": true`.
pub fn parse_timeseries_response(status: u16, body: &str) -> Result<TimeseriesPayload, FetchError> {
    let payload: TimeseriesPayload = classify_response(API_NAME, status, body)?;
    if payload.success != Some(true) {
        return Err(FetchError::NotSuccessful { api: API_NAME });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "success": true,
        "timeseries": true,
        "start_date": "2012-05-01",
        "end_date": "2012-05-02",
        "base": "EUR",
        "rates": {
            "2012-05-01": {"USD": 1.322891, "AUD": 1.278047, "CAD": 1.302303},
            "2012-05-02": {"USD": 1.315066, "AUD": 1.274202, "CAD": 1.299083}
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let payload = parse_timeseries_response(200, SAMPLE).unwrap();
        assert_eq!(payload.base, "EUR");
        assert_eq!(payload.rates.len(), 2);
        assert_eq!(payload.rates["2012-05-02"]["USD"], 1.315066);
    }

    #[test]
    fn test_missing_success_flag() {
        let body = r#"{"base": "USD", "rates": {}}"#;
        let err = parse_timeseries_response(200, body).unwrap_err();
        assert!(matches!(err, FetchError::NotSuccessful { .. }));
    }

    #[test]
    fn test_success_false_with_error() {
        let body = r#"{"success": false, "error": {"code": 106, "type": "invalid_date", "info": "You have entered an invalid date."}}"#;
        let err = parse_timeseries_response(200, body).unwrap_err();
        match err {
            FetchError::Api { message, .. } => assert!(message.contains("invalid date")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rate_limited() {
        let body = r#"{"message": "API rate limit reached. Please upgrade your plan."}"#;
        let err = parse_timeseries_response(429, body).unwrap_err();
        assert!(err.to_string().contains("rate limit"));
        assert_eq!(err.api(), "exchange_rates");
    }

    #[test]
    fn test_timeseries_url() {
        let client = ExchangeRatesClient::new("https://example.test/api/".to_string(), "k".to_string(), 5).unwrap();
        assert_eq!(client.timeseries_url(), "https://example.test/api/timeseries");
    }
}
