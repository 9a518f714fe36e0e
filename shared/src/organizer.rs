//! Flattening of the nested API payloads into flat rows.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::FetchError;
use crate::exchange_rates::TimeseriesPayload;
use crate::marketstack::EodPayload;
use crate::models::{ExchangeRateRow, StockRow};

const UNKNOWN_CURRENCY: &str = "unknown";

/// `day -> currency -> rate` into one row per (day, target currency).
pub fn organize_exchange_rates(payload: &TimeseriesPayload) -> Result<Vec<ExchangeRateRow>, FetchError> {
    let mut rows = Vec::new();
    for (day, targets) in &payload.rates {
        let date = parse_day("exchange_rates", day)?;
        for (target, rate) in targets {
            rows.push(ExchangeRateRow {
                date,
                base_currency: payload.base.clone(),
                target_currency: target.clone(),
                rate: *rate,
            });
        }
    }
    Ok(rows)
}

/// One row per EOD record. Records without a closing price are dropped.
pub fn organize_stocks(payload: &EodPayload) -> Result<Vec<StockRow>, FetchError> {
    let mut rows = Vec::with_capacity(payload.data.len());
    for record in &payload.data {
        let date = parse_day("marketstack", record.date.get(..10).unwrap_or(&record.date))?;
        let Some(close) = record.close else {
            warn!("Dropping {} on {}: no closing price", record.symbol, date);
            continue;
        };
        let currency = record
            .price_currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| UNKNOWN_CURRENCY.to_string());

        rows.push(StockRow {
            date,
            symbol: record.symbol.clone(),
            open: record.open,
            high: record.high,
            low: record.low,
            close,
            volume: record.volume,
            exchange: record.exchange.clone(),
            currency,
        });
    }
    Ok(rows)
}

fn parse_day(api: &'static str, value: &str) -> Result<NaiveDate, FetchError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FetchError::MalformedDate {
        api,
        value: value.to_string(),
    })
}
