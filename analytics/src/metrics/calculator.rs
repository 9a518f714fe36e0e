//! Derived metrics over dated series

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::data::{Change, MaxChange, Observation};
use crate::error::MetricsError;
use crate::Result;

/// Stateless metric computations over series ordered by date ascending.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Day-over-day percent changes: `(v[i+1] - v[i]) / v[i] * 100`,
    /// each dated at `v[i+1]`.
    ///
    /// A zero `v[i]` is an error rather than an infinite or NaN change.
    pub fn percent_changes(series: &[Observation]) -> Result<Vec<Change>> {
        series
            .windows(2)
            .map(|pair| {
                let (prev, next) = (pair[0], pair[1]);
                if prev.value == 0.0 {
                    return Err(MetricsError::ZeroBaseline { date: next.date });
                }
                Ok(Change::new(
                    next.date,
                    (next.value - prev.value) / prev.value * 100.0,
                ))
            })
            .collect()
    }

    /// Pearson correlation coefficient using the sum-based formula.
    ///
    /// Returns 0.0 when either side has zero variance (including empty input).
    pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
        if x.len() != y.len() {
            return Err(MetricsError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }

        if is_constant(x) || is_constant(y) {
            return Ok(0.0);
        }

        let n = x.len() as f64;
        let sum_x: f64 = x.iter().sum();
        let sum_y: f64 = y.iter().sum();
        let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
        let sum_x2: f64 = x.iter().map(|a| a * a).sum();
        let sum_y2: f64 = y.iter().map(|b| b * b).sum();

        let numerator = n * sum_xy - sum_x * sum_y;
        let var_x = n * sum_x2 - sum_x * sum_x;
        let var_y = n * sum_y2 - sum_y * sum_y;

        let denominator = (var_x * var_y).sqrt();
        if !(denominator > 0.0) {
            return Ok(0.0);
        }

        Ok((numerator / denominator).clamp(-1.0, 1.0))
    }

    /// Pair two change series on their dates, keeping the order of `a`.
    pub fn align(a: &[Change], b: &[Change]) -> (Vec<f64>, Vec<f64>) {
        let by_date: HashMap<NaiveDate, f64> = b.iter().map(|c| (c.date, c.percent)).collect();

        a.iter()
            .filter_map(|c| by_date.get(&c.date).map(|other| (c.percent, *other)))
            .unzip()
    }

    /// Correlation of two change series over the dates they share.
    pub fn correlate(a: &[Change], b: &[Change]) -> Result<f64> {
        let (x, y) = Self::align(a, b);
        Self::pearson(&x, &y)
    }

    /// The consecutive-pair change with the greatest absolute value.
    /// The earliest one wins a tie.
    pub fn max_change(series: &[Observation]) -> Result<MaxChange> {
        let changes = Self::percent_changes(series)?;
        let mut best = MaxChange::default();

        for change in changes {
            if change.percent.abs() > best.percent.abs() {
                best = MaxChange {
                    date: Some(change.date),
                    percent: change.percent,
                };
            }
        }

        Ok(best)
    }
}

/// Zero variance, checked exactly: the sum formula leaves rounding residue
/// for constant series such as `[0.1; 5]`.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_percent_changes() {
        let series = vec![
            Observation::new(day(1), 100.0),
            Observation::new(day(2), 101.0),
            Observation::new(day(3), 102.0),
        ];
        let changes = MetricsCalculator::percent_changes(&series).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].date, day(2));
        assert!((changes[0].percent - 1.0).abs() < 1e-12);
        assert_eq!(changes[1].date, day(3));
        assert!((changes[1].percent - 0.990_099_009_9).abs() < 1e-9);
    }

    #[test]
    fn test_percent_changes_zero_baseline() {
        let series = vec![
            Observation::new(day(1), 0.0),
            Observation::new(day(2), 1.0),
        ];
        let err = MetricsCalculator::percent_changes(&series).unwrap_err();
        assert_eq!(err, MetricsError::ZeroBaseline { date: day(2) });
    }

    #[test]
    fn test_percent_changes_zero_after() {
        // Falling to zero is a valid -100% move
        let series = vec![
            Observation::new(day(1), 0.3),
            Observation::new(day(2), 0.0),
        ];
        let changes = MetricsCalculator::percent_changes(&series).unwrap();
        assert!((changes[0].percent + 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_length_mismatch() {
        let err = MetricsCalculator::pearson(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, MetricsError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_pearson_empty() {
        assert_eq!(MetricsCalculator::pearson(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_align_keeps_shared_dates() {
        let a = vec![Change::new(day(2), 1.0), Change::new(day(3), 2.0), Change::new(day(6), 3.0)];
        let b = vec![Change::new(day(3), -2.0), Change::new(day(6), -3.0), Change::new(day(7), 9.0)];

        let (x, y) = MetricsCalculator::align(&a, &b);
        assert_eq!(x, vec![2.0, 3.0]);
        assert_eq!(y, vec![-2.0, -3.0]);
    }

    #[test]
    fn test_max_change_tie_keeps_first() {
        let series = vec![
            Observation::new(day(1), 100.0),
            Observation::new(day(2), 110.0),
            Observation::new(day(3), 121.0),
        ];
        let max = MetricsCalculator::max_change(&series).unwrap();
        assert_eq!(max.date, Some(day(2)));
    }
}
