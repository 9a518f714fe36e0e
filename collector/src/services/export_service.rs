use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::repositories::{ExchangeRateRepository, StockRepository};

pub const EXCHANGE_RATE_HEADER: [&str; 4] = ["date", "base_currency", "target_currency", "exchange_rate"];
pub const STOCK_HEADER: [&str; 9] = [
    "date", "symbol", "open", "high", "low", "close", "volume", "exchange", "currency",
];

pub const EXCHANGE_RATE_FILE: &str = "exchange_rates.csv";
pub const STOCK_FILE: &str = "stocks.csv";

/// Write `rows` under an explicit header so an empty table still yields one.
pub fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export both fact tables into `dir`. Returns the written paths.
pub async fn export_all(
    rates: &ExchangeRateRepository,
    stocks: &StockRepository,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let rate_rows = rates.all_rows().await?;
    let rates_path = dir.join(EXCHANGE_RATE_FILE);
    write_csv(&rates_path, &EXCHANGE_RATE_HEADER, &rate_rows)?;
    info!("Exported {} exchange rates to {}", rate_rows.len(), rates_path.display());

    let stock_rows = stocks.all_rows().await?;
    let stocks_path = dir.join(STOCK_FILE);
    write_csv(&stocks_path, &STOCK_HEADER, &stock_rows)?;
    info!("Exported {} stock prices to {}", stock_rows.len(), stocks_path.display());

    Ok(vec![rates_path, stocks_path])
}
