use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use tracing::info;

use crate::repositories::DimensionRepository;
use crate::state::AppState;

pub async fn handle_setup(state: &AppState) -> Result<()> {
    Migrator::up(state.db.as_ref(), None).await?;
    info!("Schema is up to date");

    let currencies = state.config.all_currencies();
    let symbols = &state.config.stock_symbols;
    let inserted = DimensionRepository::new(state.db.clone())
        .seed(&currencies, symbols)
        .await?;

    println!(
        "Setup complete: {} currencies, {} symbols ({} new rows)",
        currencies.len(),
        symbols.len(),
        inserted
    );
    Ok(())
}
