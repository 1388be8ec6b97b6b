//! Patrimoine service traits.

use chrono::NaiveDate;

use super::patrimoine_model::{PatrimoinePoint, PatrimoineResponse, PossessionValuation};
use crate::errors::Result;

/// Trait defining the contract for patrimoine service operations.
pub trait PatrimoineServiceTrait: Send + Sync {
    /// Patrimoine as of `date`.
    ///
    /// # Arguments
    /// * `owner` - Restrict to one holder; `None` aggregates every record
    /// * `date` - The as-of date
    fn get_patrimoine(&self, owner: Option<&str>, date: NaiveDate) -> Result<PatrimoineResponse>;

    /// Patrimoine every `step_days` between `start_date` and `end_date`.
    ///
    /// # Returns
    /// Points ordered by date ascending. Fails with `InvalidRange` on inverted
    /// bounds or a zero step.
    fn get_patrimoine_range(
        &self,
        owner: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        step_days: u32,
    ) -> Result<Vec<PatrimoinePoint>>;

    /// Value of a single possession at `date`, whether or not it is active.
    fn get_possession_value(
        &self,
        owner: &str,
        label: &str,
        date: NaiveDate,
    ) -> Result<PossessionValuation>;
}
