use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::repositories::{DimensionRepository, ExchangeRateRepository, StockRepository};
use crate::state::AppState;

fn describe(range: Option<(NaiveDate, NaiveDate)>) -> String {
    match range {
        Some((first, last)) => format!("{} to {}", first, last),
        None => "empty".to_string(),
    }
}

/// One line per table: seeded names for dimensions, row counts and date
/// range for facts.
async fn status_lines(db: Arc<DatabaseConnection>) -> Result<Vec<String>> {
    let dimensions = DimensionRepository::new(db.clone());
    let rates = ExchangeRateRepository::new(db.clone());
    let stocks = StockRepository::new(db);

    Ok(vec![
        format!("currency: {}", dimensions.currency_names().await?.join(", ")),
        format!("symbol: {}", dimensions.symbol_names().await?.join(", ")),
        format!(
            "exchange_rate: {} rows, {}",
            rates.count().await?,
            describe(rates.date_range().await?)
        ),
        format!(
            "stock: {} rows, {}",
            stocks.count().await?,
            describe(stocks.date_range().await?)
        ),
    ])
}

pub async fn handle_status(state: &AppState) -> Result<()> {
    for line in status_lines(state.db.clone()).await? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, seeded_db, stock_row};

    #[tokio::test]
    async fn test_status_lines() {
        let db = seeded_db().await;
        StockRepository::new(db.clone())
            .store(&[
                stock_row(date(2024, 10, 1), "AAPL", 226.2),
                stock_row(date(2024, 10, 3), "NVDA", 117.0),
            ])
            .await
            .unwrap();

        let lines = status_lines(db).await.unwrap();

        assert_eq!(
            lines,
            vec![
                "currency: USD, CNY, EUR, GBP",
                "symbol: AAPL, NVDA, TSLA",
                "exchange_rate: 0 rows, empty",
                "stock: 2 rows, 2024-10-01 to 2024-10-03",
            ]
        );
    }
}
