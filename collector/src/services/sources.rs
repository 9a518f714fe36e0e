//! Live API sources and the repository sinks they feed.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::organizer::{organize_exchange_rates, organize_stocks};
use shared::{ExchangeRateRow, ExchangeRatesClient, FetchError, MarketstackClient, StockRow};

use super::ingest_service::{DailySource, RowSink};
use crate::repositories::{ExchangeRateRepository, StockRepository, StoreError};

/// Daily rates of every target currency against one base.
pub struct ExchangeRateSource {
    client: ExchangeRatesClient,
    base: String,
    targets: Vec<String>,
}

impl ExchangeRateSource {
    pub fn new(client: ExchangeRatesClient, base: String, targets: Vec<String>) -> Self {
        Self {
            client,
            base,
            targets,
        }
    }
}

#[async_trait]
impl DailySource for ExchangeRateSource {
    type Row = ExchangeRateRow;

    fn name(&self) -> &str {
        "exchange rates"
    }

    fn records_per_call(&self) -> usize {
        self.targets.len()
    }

    async fn fetch_day(&self, day: NaiveDate) -> Result<Vec<ExchangeRateRow>, FetchError> {
        let payload = self
            .client
            .fetch_timeseries(&self.base, &self.targets, day, day)
            .await?;
        organize_exchange_rates(&payload)
    }
}

/// Daily end-of-day prices of a fixed symbol list.
pub struct StockSource {
    client: MarketstackClient,
    symbols: Vec<String>,
}

impl StockSource {
    pub fn new(client: MarketstackClient, symbols: Vec<String>) -> Self {
        Self { client, symbols }
    }
}

#[async_trait]
impl DailySource for StockSource {
    type Row = StockRow;

    fn name(&self) -> &str {
        "stocks"
    }

    fn records_per_call(&self) -> usize {
        self.symbols.len()
    }

    async fn fetch_day(&self, day: NaiveDate) -> Result<Vec<StockRow>, FetchError> {
        let payload = self.client.fetch_eod(&self.symbols, day, day).await?;
        organize_stocks(&payload)
    }
}

#[async_trait]
impl RowSink<ExchangeRateRow> for ExchangeRateRepository {
    async fn store(&self, rows: &[ExchangeRateRow]) -> Result<u64, StoreError> {
        ExchangeRateRepository::store(self, rows).await
    }
}

#[async_trait]
impl RowSink<StockRow> for StockRepository {
    async fn store(&self, rows: &[StockRow]) -> Result<u64, StoreError> {
        StockRepository::store(self, rows).await
    }
}
