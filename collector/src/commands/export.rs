use anyhow::Result;
use std::path::PathBuf;

use crate::repositories::{ExchangeRateRepository, StockRepository};
use crate::services::export_service::export_all;
use crate::state::AppState;

pub async fn handle_export(state: &AppState, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| PathBuf::from(&state.config.output_dir));
    let rates = ExchangeRateRepository::new(state.db.clone());
    let stocks = StockRepository::new(state.db.clone());

    for path in export_all(&rates, &stocks, &dir).await? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
