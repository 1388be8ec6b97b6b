//! Patrimoine module.
//!
//! Aggregates possession valuations into a net worth figure at a date and into
//! a time series over a date range.

mod patrimoine_aggregator;
mod patrimoine_model;
mod patrimoine_service;
mod patrimoine_traits;

pub use patrimoine_aggregator::*;
pub use patrimoine_model::*;
pub use patrimoine_service::*;
pub use patrimoine_traits::*;

#[cfg(test)]
mod patrimoine_service_tests;
