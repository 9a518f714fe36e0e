//! Errors raised by the metric computations

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// The observation before `date` is zero, so the change into `date` has no defined percentage.
    #[error("zero baseline before {date}: percent change is undefined")]
    ZeroBaseline { date: NaiveDate },

    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}
