//! Data module
//!
//! Dated observations and derived change series.

pub mod series;

pub use series::*;
