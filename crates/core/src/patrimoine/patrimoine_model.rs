//! Patrimoine (net worth) domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::possessions::AssetType;

/// A single point in a patrimoine time series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatrimoinePoint {
    /// Date of this data point
    pub date: NaiveDate,
    /// Sum of the values of the possessions active at `date`
    pub total_value: Decimal,
}

/// Value of one possession at a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PossessionValuation {
    pub owner: String,
    pub label: String,
    pub asset_type: AssetType,
    pub value: Decimal,
}

/// Patrimoine at a date with the value of each contributing possession.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatrimoineResponse {
    pub date: NaiveDate,
    pub total_value: Decimal,
    /// Active possessions only, in repository order
    pub possessions: Vec<PossessionValuation>,
}

impl PatrimoineResponse {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_value: Decimal::ZERO,
            possessions: Vec::new(),
        }
    }
}
