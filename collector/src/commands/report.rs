use anyhow::Result;
use std::path::PathBuf;

use crate::repositories::{ExchangeRateRepository, StockRepository};
use crate::services::report_service::{build_report, write_report};
use crate::state::AppState;

pub const REPORT_FILE: &str = "metrics.txt";

pub async fn handle_report(state: &AppState, out: Option<PathBuf>) -> Result<()> {
    let config = &state.config;
    let out = out.unwrap_or_else(|| PathBuf::from(&config.output_dir).join(REPORT_FILE));
    let rates = ExchangeRateRepository::new(state.db.clone());
    let stocks = StockRepository::new(state.db.clone());

    let report = build_report(
        &rates,
        &stocks,
        &config.base_currency,
        &config.target_currencies,
        &config.stock_symbols,
    )
    .await?;
    write_report(&report, &out)?;

    println!("{}", report.format());
    Ok(())
}
