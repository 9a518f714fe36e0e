use anyhow::Result;
use chrono::{Days, NaiveDate};
use shared::{ExchangeRatesClient, MarketstackClient};
use tracing::info;

use super::IngestTarget;
use crate::repositories::{ExchangeRateRepository, StockRepository};
use crate::services::ingest_service::{backfill, DailySource, IngestSummary, QuotaPlan, RowSink};
use crate::services::sources::{ExchangeRateSource, StockSource};
use crate::state::AppState;

pub async fn handle_ingest(
    state: &AppState,
    target: IngestTarget,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<()> {
    let config = &state.config;

    if matches!(target, IngestTarget::Rates | IngestTarget::All) {
        let client = ExchangeRatesClient::new(
            config.exchange_rate_api_url.clone(),
            config.require_exchange_rate_api_key()?.to_string(),
            config.http_timeout_secs,
        )?;
        let source = ExchangeRateSource::new(
            client,
            config.base_currency.clone(),
            config.target_currencies.clone(),
        );
        let repo = ExchangeRateRepository::new(state.db.clone());
        let summary = run(&source, &repo, start, end, config.record_budget).await?;
        print_summary("exchange rates", &summary);
    }

    if matches!(target, IngestTarget::Stocks | IngestTarget::All) {
        let client = MarketstackClient::new(
            config.stock_api_url.clone(),
            config.require_stock_api_key()?.to_string(),
            config.http_timeout_secs,
        )?;
        let source = StockSource::new(client, config.stock_symbols.clone());
        let repo = StockRepository::new(state.db.clone());
        let summary = run(&source, &repo, start, end, config.record_budget).await?;
        print_summary("stocks", &summary);
    }

    Ok(())
}

async fn run<S, K>(
    source: &S,
    sink: &K,
    start: NaiveDate,
    end: Option<NaiveDate>,
    record_budget: usize,
) -> Result<IngestSummary>
where
    S: DailySource,
    K: RowSink<S::Row>,
{
    let plan = QuotaPlan::new(record_budget, source.records_per_call());
    let end = match end {
        Some(end) => end,
        None => single_batch_end(start, plan)?,
    };
    info!("Ingesting {} for {} to {}", source.name(), start, end);
    backfill(source, sink, start, end, plan).await
}

/// Last day of the batch starting at `start`
fn single_batch_end(start: NaiveDate, plan: QuotaPlan) -> Result<NaiveDate> {
    let days = plan.days_per_batch()? as u64;
    start
        .checked_add_days(Days::new(days - 1))
        .ok_or_else(|| anyhow::anyhow!("date overflow after {}", start))
}

fn print_summary(name: &str, summary: &IngestSummary) {
    println!(
        "{}: {} windows, {} calls ({} failed), {} rows fetched, {} inserted",
        name,
        summary.windows,
        summary.calls,
        summary.failed_calls,
        summary.rows_fetched,
        summary.rows_inserted
    );
}
