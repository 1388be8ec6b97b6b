//! Patrimoine Core - Domain entities, valuation engine, services, and traits.
//!
//! This crate contains the valuation logic for possessions and their
//! aggregation into a patrimoine (net worth). It is storage-agnostic and
//! defines the repository trait implemented by the `storage-json` crate.

pub mod constants;
pub mod errors;
pub mod patrimoine;
pub mod possessions;
pub mod utils;
pub mod valuation;

// Re-export common types from possession and patrimoine modules
pub use patrimoine::*;
pub use possessions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
