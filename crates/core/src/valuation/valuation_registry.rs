use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::flow_strategy::FlowStrategy;
use super::valuation_strategy::{LinearDepreciationStrategy, ValuationStrategy};
use crate::possessions::AssetType;

/// Maps an asset type to the strategy that values it.
///
/// Exactly one strategy is held per asset type; unregistered types resolve to
/// the default strategy. `EQUITY` and `REAL_ESTATE` are reserved slots: they
/// stay on the default until a caller registers a price or appraisal strategy.
pub struct StrategyRegistry {
    strategies: HashMap<AssetType, Arc<dyn ValuationStrategy>>,
    default_strategy: Arc<dyn ValuationStrategy>,
}

impl StrategyRegistry {
    /// Registry holding only the default linear depreciation strategy.
    pub fn new() -> Self {
        Self::with_default(Arc::new(LinearDepreciationStrategy))
    }

    pub fn with_default(default_strategy: Arc<dyn ValuationStrategy>) -> Self {
        Self {
            strategies: HashMap::new(),
            default_strategy,
        }
    }

    /// Default registry plus the strategies shipped with the core
    /// (monthly flows).
    pub fn with_builtin_strategies() -> Self {
        let mut registry = Self::new();
        registry.register(AssetType::Flow, Arc::new(FlowStrategy));
        registry
    }

    /// Registers `strategy` for `asset_type`, returning the one it replaces.
    pub fn register(
        &mut self,
        asset_type: AssetType,
        strategy: Arc<dyn ValuationStrategy>,
    ) -> Option<Arc<dyn ValuationStrategy>> {
        debug!(
            "Registering valuation strategy '{}' for {}",
            strategy.name(),
            asset_type
        );
        self.strategies.insert(asset_type, strategy)
    }

    pub fn is_registered(&self, asset_type: &AssetType) -> bool {
        self.strategies.contains_key(asset_type)
    }

    /// Strategy for `asset_type`, falling back to the default.
    pub fn resolve(&self, asset_type: &AssetType) -> &dyn ValuationStrategy {
        self.strategies
            .get(asset_type)
            .unwrap_or(&self.default_strategy)
            .as_ref()
    }

    pub fn default_strategy(&self) -> &dyn ValuationStrategy {
        self.default_strategy.as_ref()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
