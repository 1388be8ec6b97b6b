use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::possessions::Possession;
use crate::utils::time_utils::years_between;

/// A per-asset-type valuation function.
///
/// Implementations must be pure: the same `(possession, target_date)` always
/// yields the same value, with no I/O and no mutation.
pub trait ValuationStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Value of `possession` at `target_date`. Never negative.
    fn value_at(&self, possession: &Possession, target_date: NaiveDate) -> Result<Decimal>;
}

/// The date a valuation is frozen at: the target date, or the end date when the
/// possession was closed before it.
pub fn effective_date(possession: &Possession, target_date: NaiveDate) -> NaiveDate {
    match possession.end_date {
        Some(end) if end < target_date => end,
        _ => target_date,
    }
}

/// Default strategy: linear depreciation of the initial value.
///
/// `value = max(0, initial × (1 − rate × elapsed_years))`, constant without a
/// rate, and the initial value for dates before the start date.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearDepreciationStrategy;

impl ValuationStrategy for LinearDepreciationStrategy {
    fn name(&self) -> &'static str {
        "linear_depreciation"
    }

    fn value_at(&self, possession: &Possession, target_date: NaiveDate) -> Result<Decimal> {
        let effective = effective_date(possession, target_date);
        let elapsed_years = years_between(possession.start_date, effective)?;

        if elapsed_years < Decimal::ZERO {
            return Ok(possession.initial_value);
        }
        let rate = match possession.amortization_rate {
            Some(rate) => rate,
            None => return Ok(possession.initial_value),
        };

        let factor = rate
            .checked_mul(elapsed_years)
            .and_then(|lost| Decimal::ONE.checked_sub(lost))
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "depreciation of '{}' overflows at rate {}",
                    possession.label, rate
                ))
            })?;
        if factor <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let value = possession.initial_value.checked_mul(factor).ok_or_else(|| {
            Error::invalid_input(format!(
                "value of '{}' overflows at rate {}",
                possession.label, rate
            ))
        })?;
        Ok(value.round_dp(DECIMAL_PRECISION))
    }
}
