use std::sync::Arc;

use chrono::NaiveDate;
use log::{trace, warn};
use rust_decimal::Decimal;

use super::valuation_registry::StrategyRegistry;
use crate::errors::{Error, Result};
use crate::possessions::Possession;

/// Values one possession at one date by dispatching on its asset type.
///
/// The active flag is not consulted: closed or not-yet-started possessions can
/// still be valued, which is what historical "what was it worth" queries need.
#[derive(Clone)]
pub struct ValuationEngine {
    registry: Arc<StrategyRegistry>,
}

impl ValuationEngine {
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn value_at(&self, possession: &Possession, target_date: NaiveDate) -> Result<Decimal> {
        if let Some(end) = possession.end_date {
            if end < possession.start_date {
                return Err(Error::InvalidDate(format!(
                    "'{}' ends on {} before it starts on {}",
                    possession.label, end, possession.start_date
                )));
            }
        }

        let strategy = self.registry.resolve(&possession.asset_type);
        trace!(
            "Valuing '{}' ({}) at {} with {}",
            possession.label,
            possession.asset_type,
            target_date,
            strategy.name()
        );

        let value = strategy.value_at(possession, target_date)?;
        if value < Decimal::ZERO {
            warn!(
                "Strategy {} returned negative value {} for '{}'; flooring at zero",
                strategy.name(),
                value,
                possession.label
            );
            return Ok(Decimal::ZERO);
        }
        Ok(value)
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(Arc::new(StrategyRegistry::with_builtin_strategies()))
    }
}
