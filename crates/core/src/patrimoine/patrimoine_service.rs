//! Patrimoine service implementation.

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use super::patrimoine_aggregator::PatrimoineAggregator;
use super::patrimoine_model::{PatrimoinePoint, PatrimoineResponse, PossessionValuation};
use super::patrimoine_traits::PatrimoineServiceTrait;
use crate::errors::{Error, Result};
use crate::possessions::{find_by_label, PossessionRepositoryTrait};

/// Loads a snapshot from the repository and hands it to the aggregator.
pub struct PatrimoineService {
    repository: Arc<dyn PossessionRepositoryTrait>,
    aggregator: PatrimoineAggregator,
}

impl PatrimoineService {
    pub fn new(
        repository: Arc<dyn PossessionRepositoryTrait>,
        aggregator: PatrimoineAggregator,
    ) -> Self {
        Self {
            repository,
            aggregator,
        }
    }
}

impl PatrimoineServiceTrait for PatrimoineService {
    fn get_patrimoine(&self, owner: Option<&str>, date: NaiveDate) -> Result<PatrimoineResponse> {
        let possessions = self.repository.list(owner)?;
        let response = self.aggregator.breakdown_at(&possessions, date)?;
        debug!(
            "Patrimoine at {}: {} from {} active of {} possessions",
            date,
            response.total_value,
            response.possessions.len(),
            possessions.len()
        );
        Ok(response)
    }

    fn get_patrimoine_range(
        &self,
        owner: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        step_days: u32,
    ) -> Result<Vec<PatrimoinePoint>> {
        let possessions = self.repository.list(owner)?;
        self.aggregator
            .series_over(&possessions, start_date, end_date, step_days)
    }

    fn get_possession_value(
        &self,
        owner: &str,
        label: &str,
        date: NaiveDate,
    ) -> Result<PossessionValuation> {
        let possessions = self.repository.list(Some(owner))?;
        let possession =
            find_by_label(&possessions, owner, label).ok_or_else(|| Error::not_found(owner, label))?;
        let value = self.aggregator.engine().value_at(possession, date)?;
        Ok(PossessionValuation {
            owner: possession.owner.clone(),
            label: possession.label.clone(),
            asset_type: possession.asset_type.clone(),
            value,
        })
    }
}
