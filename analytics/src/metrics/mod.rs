//! Metrics module
//!
//! Change, correlation and max-move computations plus the text report built from them.

pub mod calculator;
pub mod report;

pub use calculator::*;
pub use report::*;
