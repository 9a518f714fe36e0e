//! Dated series structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single value observed on a day: an exchange rate or a closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Percent change from the previous observation, dated at the later one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub date: NaiveDate,
    pub percent: f64,
}

impl Change {
    pub fn new(date: NaiveDate, percent: f64) -> Self {
        Self { date, percent }
    }
}

/// Largest absolute move in a series.
///
/// `date` is `None` when the series has fewer than two observations, in which
/// case `percent` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxChange {
    pub date: Option<NaiveDate>,
    pub percent: f64,
}

impl Default for MaxChange {
    fn default() -> Self {
        Self {
            date: None,
            percent: 0.0,
        }
    }
}

/// Values of a change series, in order
pub fn percents(changes: &[Change]) -> Vec<f64> {
    changes.iter().map(|c| c.percent).collect()
}

/// Build observations from `(date, value)` pairs
pub fn observations<I>(pairs: I) -> Vec<Observation>
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    pairs
        .into_iter()
        .map(|(date, value)| Observation::new(date, value))
        .collect()
}
