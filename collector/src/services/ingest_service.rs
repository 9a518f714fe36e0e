//! Day-by-day backfill under the upstream record quota.
//!
//! Both APIs are queried one calendar day per call. A call returns one
//! record per currency pair or symbol, and the provider allows a fixed
//! number of records per batch, so a date range is cut into windows of as
//! many days as fit in that budget.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use shared::FetchError;
use tracing::{info, warn};

use crate::repositories::StoreError;

/// Record budget of one batch and records produced by a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPlan {
    pub record_budget: usize,
    pub records_per_call: usize,
}

impl QuotaPlan {
    pub fn new(record_budget: usize, records_per_call: usize) -> Self {
        Self {
            record_budget,
            records_per_call,
        }
    }

    /// Largest number of days whose records still fit in the budget.
    pub fn days_per_batch(&self) -> Result<usize> {
        if self.records_per_call == 0 {
            bail!("a call must produce at least one record");
        }
        let days = self.record_budget / self.records_per_call;
        if days == 0 {
            bail!(
                "{} records per call exceed the budget of {}",
                self.records_per_call,
                self.record_budget
            );
        }
        Ok(days)
    }
}

/// Inclusive run of calendar days fetched as one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Zero when `end` precedes `start`
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }
}

/// Cut `start..=end` into consecutive windows of `days_per_batch` days.
pub fn plan_windows(start: NaiveDate, end: NaiveDate, plan: QuotaPlan) -> Result<Vec<DateWindow>> {
    let step = plan.days_per_batch()? as u64;
    let mut windows = Vec::new();
    let mut window_start = start;

    while window_start <= end {
        let window_end = window_start
            .checked_add_days(Days::new(step - 1))
            .map_or(end, |d| d.min(end));
        windows.push(DateWindow {
            start: window_start,
            end: window_end,
        });
        match window_end.succ_opt() {
            Some(next) => window_start = next,
            None => break,
        }
    }

    Ok(windows)
}

/// Upstream that yields the rows of one calendar day per call.
#[async_trait]
pub trait DailySource: Send + Sync {
    type Row: Send + Sync;

    fn name(&self) -> &str;

    /// Records a single call is expected to return
    fn records_per_call(&self) -> usize;

    async fn fetch_day(&self, day: NaiveDate) -> Result<Vec<Self::Row>, FetchError>;
}

/// Destination of fetched rows. Returns how many were new.
#[async_trait]
pub trait RowSink<R: Send + Sync>: Send + Sync {
    async fn store(&self, rows: &[R]) -> Result<u64, StoreError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub windows: usize,
    pub calls: usize,
    pub failed_calls: usize,
    pub rows_fetched: usize,
    pub rows_inserted: u64,
}

/// Fetch and store every day of `start..=end`, one call per day.
///
/// A failed fetch or a row naming an unknown currency or symbol skips that
/// call. A database error aborts the run.
pub async fn backfill<S, K>(
    source: &S,
    sink: &K,
    start: NaiveDate,
    end: NaiveDate,
    plan: QuotaPlan,
) -> Result<IngestSummary>
where
    S: DailySource,
    K: RowSink<S::Row>,
{
    let windows = plan_windows(start, end, plan)?;
    let mut summary = IngestSummary {
        windows: windows.len(),
        ..Default::default()
    };

    info!(
        "Backfilling {} from {} to {} in {} windows",
        source.name(),
        start,
        end,
        windows.len()
    );

    for (index, window) in windows.iter().enumerate() {
        info!(
            "{} window {}/{}: {} to {}",
            source.name(),
            index + 1,
            windows.len(),
            window.start,
            window.end
        );

        for day in window.days() {
            summary.calls += 1;

            let rows = match source.fetch_day(day).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(api = e.api(), "Skipping {} for {}: {}", source.name(), day, e);
                    summary.failed_calls += 1;
                    continue;
                }
            };
            summary.rows_fetched += rows.len();

            match sink.store(&rows).await {
                Ok(inserted) => summary.rows_inserted += inserted,
                Err(StoreError::Db(e)) => return Err(e.into()),
                Err(e) => {
                    warn!("Could not store {} rows for {}: {}", source.name(), day, e);
                    summary.failed_calls += 1;
                }
            }
        }
    }

    info!(
        "{} done: {} calls, {} failed, {} rows fetched, {} inserted",
        source.name(),
        summary.calls,
        summary.failed_calls,
        summary.rows_fetched,
        summary.rows_inserted
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::ExchangeRateRepository;
    use crate::test_support::{date, rate_row, seeded_db};
    use sea_orm::DbErr;
    use shared::ExchangeRateRow;
    use std::sync::Mutex;

    struct FakeRates {
        targets: Vec<&'static str>,
        failing_day: Option<NaiveDate>,
    }

    #[async_trait]
    impl DailySource for FakeRates {
        type Row = ExchangeRateRow;

        fn name(&self) -> &str {
            "fake rates"
        }

        fn records_per_call(&self) -> usize {
            self.targets.len()
        }

        async fn fetch_day(&self, day: NaiveDate) -> Result<Vec<ExchangeRateRow>, FetchError> {
            if self.failing_day == Some(day) {
                return Err(FetchError::NotSuccessful { api: "fake" });
            }
            Ok(self
                .targets
                .iter()
                .map(|target| rate_row(day, "USD", target, 1.0))
                .collect())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        rows: Mutex<Vec<ExchangeRateRow>>,
    }

    #[async_trait]
    impl RowSink<ExchangeRateRow> for MemorySink {
        async fn store(&self, rows: &[ExchangeRateRow]) -> Result<u64, StoreError> {
            let mut stored = self.rows.lock().unwrap();
            stored.extend_from_slice(rows);
            Ok(rows.len() as u64)
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl RowSink<ExchangeRateRow> for BrokenSink {
        async fn store(&self, _rows: &[ExchangeRateRow]) -> Result<u64, StoreError> {
            Err(StoreError::Db(DbErr::Custom("disk I/O error".to_string())))
        }
    }

    fn fake(targets: Vec<&'static str>, failing_day: Option<NaiveDate>) -> FakeRates {
        FakeRates {
            targets,
            failing_day,
        }
    }

    #[test]
    fn test_days_per_batch() {
        assert_eq!(QuotaPlan::new(25, 3).days_per_batch().unwrap(), 8);
        assert_eq!(QuotaPlan::new(25, 1).days_per_batch().unwrap(), 25);
        assert_eq!(QuotaPlan::new(24, 3).days_per_batch().unwrap(), 8);
        assert!(QuotaPlan::new(25, 0).days_per_batch().is_err());
        assert!(QuotaPlan::new(25, 26).days_per_batch().is_err());
    }

    #[test]
    fn test_plan_windows_twenty_days() {
        let windows =
            plan_windows(date(2024, 10, 1), date(2024, 10, 20), QuotaPlan::new(25, 3)).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], DateWindow { start: date(2024, 10, 1), end: date(2024, 10, 8) });
        assert_eq!(windows[1], DateWindow { start: date(2024, 10, 9), end: date(2024, 10, 16) });
        assert_eq!(windows[2], DateWindow { start: date(2024, 10, 17), end: date(2024, 10, 20) });
        assert_eq!(windows.iter().map(DateWindow::day_count).sum::<usize>(), 20);
        assert_eq!(windows[2].days().count(), 4);
    }

    #[test]
    fn test_plan_windows_edges() {
        let plan = QuotaPlan::new(25, 3);
        let single = plan_windows(date(2024, 10, 1), date(2024, 10, 1), plan).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].day_count(), 1);

        assert!(plan_windows(date(2024, 10, 2), date(2024, 10, 1), plan)
            .unwrap()
            .is_empty());

        let inverted = DateWindow { start: date(2024, 10, 5), end: date(2024, 10, 1) };
        assert_eq!(inverted.day_count(), 0);
        assert_eq!(inverted.days().count(), 0);

        // Month boundary
        let windows = plan_windows(date(2024, 1, 28), date(2024, 2, 6), plan).unwrap();
        assert_eq!(windows[0].end, date(2024, 2, 4));
        assert_eq!(windows[1].start, date(2024, 2, 5));
    }

    #[tokio::test]
    async fn test_backfill_one_call_per_day() {
        let source = fake(vec!["CNY", "EUR", "GBP"], None);
        let sink = MemorySink::default();

        let summary = backfill(
            &source,
            &sink,
            date(2024, 10, 1),
            date(2024, 10, 20),
            QuotaPlan::new(25, source.records_per_call()),
        )
        .await
        .unwrap();

        assert_eq!(
            summary,
            IngestSummary {
                windows: 3,
                calls: 20,
                failed_calls: 0,
                rows_fetched: 60,
                rows_inserted: 60,
            }
        );
        assert_eq!(sink.rows.lock().unwrap().len(), 60);
    }

    #[tokio::test]
    async fn test_backfill_skips_failed_day() {
        let source = fake(vec!["EUR"], Some(date(2024, 10, 2)));
        let sink = MemorySink::default();

        let summary = backfill(
            &source,
            &sink,
            date(2024, 10, 1),
            date(2024, 10, 4),
            QuotaPlan::new(25, 1),
        )
        .await
        .unwrap();

        assert_eq!(summary.calls, 4);
        assert_eq!(summary.failed_calls, 1);
        assert_eq!(summary.rows_inserted, 3);
        let days: Vec<NaiveDate> = sink.rows.lock().unwrap().iter().map(|r| r.date).collect();
        assert_eq!(days, vec![date(2024, 10, 1), date(2024, 10, 3), date(2024, 10, 4)]);
    }

    #[tokio::test]
    async fn test_backfill_aborts_on_database_error() {
        let source = fake(vec!["EUR"], None);

        let result = backfill(
            &source,
            &BrokenSink,
            date(2024, 10, 1),
            date(2024, 10, 4),
            QuotaPlan::new(25, 1),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_backfill_into_repository_is_idempotent() {
        let db = seeded_db().await;
        let repo = ExchangeRateRepository::new(db);
        let source = fake(vec!["CNY", "EUR", "GBP"], None);
        let plan = QuotaPlan::new(25, 3);

        let first = backfill(&source, &repo, date(2024, 10, 1), date(2024, 10, 10), plan)
            .await
            .unwrap();
        let second = backfill(&source, &repo, date(2024, 10, 5), date(2024, 10, 12), plan)
            .await
            .unwrap();

        assert_eq!(first.rows_inserted, 30);
        // Only the 11th and 12th are new
        assert_eq!(second.rows_inserted, 6);
        assert_eq!(repo.count().await.unwrap(), 36);
    }

    #[tokio::test]
    async fn test_backfill_counts_unknown_currency() {
        let db = seeded_db().await;
        let repo = ExchangeRateRepository::new(db);
        let source = fake(vec!["EUR", "JPY"], None);

        let summary = backfill(
            &source,
            &repo,
            date(2024, 10, 1),
            date(2024, 10, 2),
            QuotaPlan::new(25, 2),
        )
        .await
        .unwrap();

        assert_eq!(summary.failed_calls, 2);
        assert_eq!(summary.rows_fetched, 4);
        // EUR precedes JPY in each call and stays stored
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
