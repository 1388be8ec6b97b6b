//! Valuation module - per-asset-type strategies, their registry, and the engine
//! that dispatches to them.

mod flow_strategy;
mod valuation_engine;
mod valuation_registry;
mod valuation_strategy;

pub use flow_strategy::FlowStrategy;
pub use valuation_engine::ValuationEngine;
pub use valuation_registry::StrategyRegistry;
pub use valuation_strategy::{effective_date, LinearDepreciationStrategy, ValuationStrategy};
