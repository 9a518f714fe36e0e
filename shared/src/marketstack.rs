//! Client for the end-of-day stock API (marketstack v2).

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::classify_response;
use crate::error::FetchError;

const API_NAME: &str = "marketstack";
/// Page size requested from the provider; one page is plenty for a batch window.
const PAGE_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct EodPayload {
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub data: Vec<EodRecord>,
}

impl EodPayload {
    /// More records matched than the page returned
    pub fn is_truncated(&self) -> bool {
        self.pagination
            .as_ref()
            .map_or(false, |p| p.offset + p.count < p.total)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    pub count: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EodRecord {
    pub symbol: String,
    /// ISO timestamp, e.g. `2025-01-02T00:00:00+0000`
    pub date: String,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub price_currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MarketstackClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl MarketstackClient {
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

    fn eod_url(&self) -> String {
        format!("{}/eod", self.base_url.trim_end_matches('/'))
    }

    /// Fetch end-of-day records of `symbols` for `start..=end`.
    pub async fn fetch_eod(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<EodPayload, FetchError> {
        let url = self.eod_url();
        let query = [
            ("symbols", symbols.join(",")),
            ("date_from", start.format("%Y-%m-%d").to_string()),
            ("date_to", end.format("%Y-%m-%d").to_string()),
            ("limit", PAGE_LIMIT.to_string()),
        ];
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[("access_key", self.api_key.as_str())])
            .query(&query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { api: API_NAME, source })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { api: API_NAME, source })?;

        let payload = parse_eod_response(status, &body)?;
        if let Some(page) = payload.pagination.as_ref().filter(|_| payload.is_truncated()) {
            warn!(
                "{} returned {} of {} records (limit {})",
                API_NAME, page.count, page.total, page.limit
            );
        }
        Ok(payload)
    }
}

pub fn parse_eod_response(status: u16, body: &str) -> Result<EodPayload, FetchError> {
    classify_response(API_NAME, status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pagination": {"limit": 1000, "offset": 0, "count": 2, "total": 2},
        "data": [
            {
                "open": 248.93, "high": 249.1, "low": 241.82, "close": 243.85,
                "volume": 55558000.0, "adj_close": 243.85, "name": "Apple Inc",
                "exchange_code": "NASDAQ", "asset_type": "Stock", "price_currency": "USD",
                "symbol": "AAPL", "exchange": "XNAS", "date": "2025-01-02T00:00:00+0000"
            },
            {
                "open": 390.1, "high": 392.7299, "low": 373.04, "close": 379.28,
                "volume": 109710749.0, "name": "Tesla Inc", "price_currency": "usd",
                "symbol": "TSLA", "exchange": "XNAS", "date": "2025-01-02T00:00:00+0000"
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let payload = parse_eod_response(200, SAMPLE).unwrap();
        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.pagination.as_ref().map(|p| p.total), Some(2));
        assert_eq!(payload.data[1].symbol, "TSLA");
        assert_eq!(payload.data[1].price_currency.as_deref(), Some("usd"));
    }

    #[test]
    fn test_error_payload() {
        let body = r#"{"error": {"code": "validation_error", "message": "Request failed with validation error"}}"#;
        let err = parse_eod_response(422, body).unwrap_err();
        assert!(matches!(err, FetchError::Api { .. }));
        assert!(err.to_string().starts_with("marketstack: Request failed"));
    }

    #[test]
    fn test_error_string_with_ok_status() {
        let err = parse_eod_response(200, r#"{"error": "Invalid access key"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Api { .. }));
        assert_eq!(err.api(), "marketstack");
    }

    #[test]
    fn test_truncated_page() {
        let body = r#"{"pagination": {"limit": 1, "offset": 0, "count": 1, "total": 3}, "data": []}"#;
        let payload = parse_eod_response(200, body).unwrap();
        assert!(payload.is_truncated());
    }
}
