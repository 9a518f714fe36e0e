//! Fixtures shared by the repository and service tests.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use shared::{get_db_connection, ExchangeRateRow, StockRow};
use std::sync::Arc;

use crate::repositories::DimensionRepository;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Fresh in-memory database with the schema applied and nothing seeded.
pub async fn memory_db() -> Arc<DatabaseConnection> {
    let db = get_db_connection("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

/// In-memory database seeded with USD, CNY, EUR, GBP and AAPL, NVDA, TSLA.
pub async fn seeded_db() -> Arc<DatabaseConnection> {
    let db = memory_db().await;
    DimensionRepository::new(db.clone())
        .seed(
            &strings(&["USD", "CNY", "EUR", "GBP"]),
            &strings(&["AAPL", "NVDA", "TSLA"]),
        )
        .await
        .unwrap();
    db
}

pub fn rate_row(date: NaiveDate, base: &str, target: &str, rate: f64) -> ExchangeRateRow {
    ExchangeRateRow {
        date,
        base_currency: base.to_string(),
        target_currency: target.to_string(),
        rate,
    }
}

pub fn stock_row(date: NaiveDate, symbol: &str, close: f64) -> StockRow {
    StockRow {
        date,
        symbol: symbol.to_string(),
        open: Some(226.0),
        high: Some(227.0),
        low: Some(225.0),
        close,
        volume: Some(1000.0),
        exchange: Some("XNAS".to_string()),
        currency: "USD".to_string(),
    }
}
