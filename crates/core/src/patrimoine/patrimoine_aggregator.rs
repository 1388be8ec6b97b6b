use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::patrimoine_model::{PatrimoinePoint, PatrimoineResponse, PossessionValuation};
use crate::errors::{Error, Result};
use crate::possessions::Possession;
use crate::utils::time_utils::get_dates_stepped;
use crate::valuation::ValuationEngine;

/// Reduces a snapshot of possessions into patrimoine figures.
///
/// Holds no state besides the engine; every call works on the slice it is
/// given and can run from any number of threads.
#[derive(Clone, Default)]
pub struct PatrimoineAggregator {
    engine: ValuationEngine,
}

impl PatrimoineAggregator {
    pub fn new(engine: ValuationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Sum of the values of the possessions active at `target_date`.
    /// An empty or fully inactive snapshot is worth zero.
    pub fn total_at(&self, possessions: &[Possession], target_date: NaiveDate) -> Result<Decimal> {
        possessions
            .iter()
            .filter(|p| p.is_active_at(target_date))
            .try_fold(Decimal::ZERO, |total, p| {
                add_to_total(total, self.engine.value_at(p, target_date)?, target_date)
            })
    }

    /// Same as [`total_at`](Self::total_at), keeping the value of every active
    /// possession.
    pub fn breakdown_at(
        &self,
        possessions: &[Possession],
        target_date: NaiveDate,
    ) -> Result<PatrimoineResponse> {
        let mut response = PatrimoineResponse::empty(target_date);
        for possession in possessions.iter().filter(|p| p.is_active_at(target_date)) {
            let value = self.engine.value_at(possession, target_date)?;
            response.total_value = add_to_total(response.total_value, value, target_date)?;
            response.possessions.push(PossessionValuation {
                owner: possession.owner.clone(),
                label: possession.label.clone(),
                asset_type: possession.asset_type.clone(),
                value,
            });
        }
        Ok(response)
    }

    /// Patrimoine every `step_days` from `start_date` to `end_date` inclusive.
    ///
    /// Points are computed independently and in parallel; the result is in
    /// ascending date order. The last point is `end_date` or the closest step
    /// before it.
    pub fn series_over(
        &self,
        possessions: &[Possession],
        start_date: NaiveDate,
        end_date: NaiveDate,
        step_days: u32,
    ) -> Result<Vec<PatrimoinePoint>> {
        if end_date < start_date {
            return Err(Error::InvalidRange(format!(
                "end date {} precedes start date {}",
                end_date, start_date
            )));
        }
        if step_days == 0 {
            return Err(Error::InvalidRange(
                "step must be at least one day".to_string(),
            ));
        }

        let dates = get_dates_stepped(start_date, end_date, step_days);
        debug!(
            "Computing {} patrimoine points over {} possessions ({} to {}, every {} days)",
            dates.len(),
            possessions.len(),
            start_date,
            end_date,
            step_days
        );

        dates
            .par_iter()
            .map(|date| {
                self.total_at(possessions, *date).map(|total_value| PatrimoinePoint {
                    date: *date,
                    total_value,
                })
            })
            .collect()
    }
}

fn add_to_total(total: Decimal, value: Decimal, target_date: NaiveDate) -> Result<Decimal> {
    total.checked_add(value).ok_or_else(|| {
        Error::InvalidRange(format!(
            "patrimoine at {} exceeds the representable amount",
            target_date
        ))
    })
}
