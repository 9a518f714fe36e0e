use anyhow::Result;
use tracing::info;

use crate::repositories::{ExchangeRateRepository, StockRepository};
use crate::state::AppState;

/// Dimension rows stay; only the fact tables are emptied.
pub async fn handle_clear(state: &AppState) -> Result<()> {
    let rates = ExchangeRateRepository::new(state.db.clone()).clear().await?;
    let stocks = StockRepository::new(state.db.clone()).clear().await?;
    info!("Cleared {} exchange rates and {} stock prices", rates, stocks);

    println!("Deleted {} exchange_rate rows and {} stock rows", rates, stocks);
    Ok(())
}
