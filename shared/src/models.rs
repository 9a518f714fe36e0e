use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One exchange rate for one currency pair on one day.
///
/// Field order matches the CSV export header
/// `date,base_currency,target_currency,exchange_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateRow {
    pub date: NaiveDate,
    pub base_currency: String,
    pub target_currency: String,
    #[serde(rename = "exchange_rate")]
    pub rate: f64,
}

/// One end-of-day stock record.
///
/// Field order matches the CSV export header
/// `date,symbol,open,high,low,close,volume,exchange,currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    pub date: NaiveDate,
    pub symbol: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
    pub exchange: Option<String>,
    pub currency: String,
}
