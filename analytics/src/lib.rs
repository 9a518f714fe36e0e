//! Analytics over stored exchange rate and stock price series.
//!
//! # Features
//!
//! - **Series**: dated observations and the percent changes derived from them
//! - **Metrics**: day-over-day changes, Pearson correlation, largest move
//! - **Report**: tab-delimited text summary of correlations and largest moves
//!
//! # Example
//!
//! ```
//! use analytics::prelude::*;
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
//! let closes = vec![
//!     Observation::new(day(1), 100.0),
//!     Observation::new(day(2), 110.0),
//!     Observation::new(day(3), 105.0),
//! ];
//! let max = MetricsCalculator::max_change(&closes).unwrap();
//! assert_eq!(max.date, Some(day(2)));
//! ```

pub mod data;
pub mod error;
pub mod metrics;

// Re-export commonly used types
pub mod prelude {
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::metrics::*;
}

/// Result type alias
pub type Result<T> = std::result::Result<T, error::MetricsError>;
