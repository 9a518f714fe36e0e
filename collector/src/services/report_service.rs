use analytics::data::{Change, MaxChange, Observation};
use analytics::metrics::{MetricsCalculator, MetricsReport};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::repositories::{ExchangeRateRepository, StockRepository, StoreError};

/// Load a stored series. An unknown name yields `None` so the report can
/// still cover the other series; database errors propagate.
async fn load<F>(name: &str, query: F) -> Result<Option<Vec<Observation>>>
where
    F: std::future::Future<Output = Result<Vec<Observation>, StoreError>>,
{
    match query.await {
        Ok(series) => Ok(Some(series)),
        Err(StoreError::Db(e)) => Err(e.into()),
        Err(e) => {
            warn!("No series for {}: {}", name, e);
            Ok(None)
        }
    }
}

fn changes(name: &str, series: &[Observation]) -> Option<Vec<Change>> {
    match MetricsCalculator::percent_changes(series) {
        Ok(changes) => Some(changes),
        Err(e) => {
            warn!("Cannot compute changes of {}: {}", name, e);
            None
        }
    }
}

fn max_change(name: &str, series: &[Observation]) -> Option<MaxChange> {
    match MetricsCalculator::max_change(series) {
        Ok(max) => Some(max),
        Err(e) => {
            warn!("Cannot compute max change of {}: {}", name, e);
            None
        }
    }
}

/// Correlate every symbol with every target currency and find the largest
/// move of each series.
pub async fn build_report(
    rates: &ExchangeRateRepository,
    stocks: &StockRepository,
    base: &str,
    targets: &[String],
    symbols: &[String],
) -> Result<MetricsReport> {
    let mut report = MetricsReport::new(targets.to_vec());

    let mut rate_changes = Vec::with_capacity(targets.len());
    for target in targets {
        let series = load(target, rates.series(base, target)).await?;
        report.push_currency_move(target.as_str(), series.as_deref().and_then(|s| max_change(target, s)));
        rate_changes.push(series.as_deref().and_then(|s| changes(target, s)));
    }

    for symbol in symbols {
        let series = load(symbol, stocks.series(symbol)).await?;
        report.push_stock_move(symbol.as_str(), series.as_deref().and_then(|s| max_change(symbol, s)));
        let stock_changes = series.as_deref().and_then(|s| changes(symbol, s));

        let values = targets
            .iter()
            .zip(&rate_changes)
            .map(|(target, rate)| match (&stock_changes, rate) {
                (Some(stock), Some(rate)) => match MetricsCalculator::correlate(stock, rate) {
                    Ok(r) => Some(r),
                    Err(e) => {
                        warn!("Cannot correlate {} with {}: {}", symbol, target, e);
                        None
                    }
                },
                _ => None,
            })
            .collect();
        report.push_correlations(symbol.as_str(), values);
    }

    Ok(report)
}

pub fn write_report(report: &MetricsReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, report.format())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}
