//! Possession domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::constants::DEFAULT_OWNER;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::flexible_date;

/// Tag selecting the valuation strategy of a possession.
///
/// Serialized as a SCREAMING_SNAKE_CASE string. Unknown tags are preserved as
/// `Custom` and valued with the default strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    #[default]
    Standard, // Depreciating or constant-value goods, cash, accounts
    Flow,       // Recurring monthly credit (salary, rent)
    Equity,     // Listed shares; needs an externally supplied price
    RealEstate, // Property; needs an externally supplied appraisal
    Custom(String),
}

impl AssetType {
    pub fn as_str(&self) -> &str {
        match self {
            AssetType::Standard => "STANDARD",
            AssetType::Flow => "FLOW",
            AssetType::Equity => "EQUITY",
            AssetType::RealEstate => "REAL_ESTATE",
            AssetType::Custom(tag) => tag.as_str(),
        }
    }
}

impl From<String> for AssetType {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "" | "STANDARD" => AssetType::Standard,
            "FLOW" => AssetType::Flow,
            "EQUITY" => AssetType::Equity,
            "REAL_ESTATE" => AssetType::RealEstate,
            _ => AssetType::Custom(tag),
        }
    }
}

impl From<AssetType> for String {
    fn from(asset_type: AssetType) -> Self {
        asset_type.as_str().to_string()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a possession, derived from its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PossessionState {
    Open,
    Closed,
}

/// Domain model representing one owned asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Possession {
    pub owner: String,
    pub label: String,
    pub initial_value: Decimal,
    #[serde(with = "flexible_date")]
    pub start_date: NaiveDate,
    #[serde(default, with = "flexible_date::option")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub amortization_rate: Option<Decimal>,
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(default)]
    pub type_specific_fields: Map<String, Value>,
}

impl Possession {
    pub fn state(&self) -> PossessionState {
        match self.end_date {
            Some(_) => PossessionState::Closed,
            None => PossessionState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// A possession is active at `date` when it has started on or before it and
    /// has not ended on or before it.
    pub fn is_active_at(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| end > date)
    }

    /// Checks the record's own invariants.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::MissingField("label".to_string()).into());
        }
        if self.owner.trim().is_empty() {
            return Err(ValidationError::MissingField("owner".to_string()).into());
        }
        if self.initial_value < Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "initial value of '{}' must not be negative, got {}",
                self.label, self.initial_value
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(Error::InvalidDate(format!(
                    "end date {} of '{}' precedes its start date {}",
                    end, self.label, self.start_date
                )));
            }
        }
        Ok(())
    }

    /// Open -> Closed transition.
    pub fn close(&mut self, as_of: NaiveDate) -> Result<()> {
        if let Some(end_date) = self.end_date {
            return Err(Error::AlreadyClosed {
                label: self.label.clone(),
                end_date,
            });
        }
        if as_of < self.start_date {
            return Err(Error::InvalidDate(format!(
                "cannot close '{}' on {} before its start date {}",
                self.label, as_of, self.start_date
            )));
        }
        self.end_date = Some(as_of);
        Ok(())
    }

    /// Applies a patch in either state. The record is left untouched when the
    /// patched result would break an invariant.
    pub fn apply_patch(&mut self, patch: &PossessionPatch) -> Result<()> {
        let mut patched = self.clone();
        if let Some(value) = patch.initial_value {
            patched.initial_value = value;
        }
        if let Some(rate) = patch.amortization_rate {
            patched.amortization_rate = Some(rate);
        }
        if let Some(end) = patch.end_date {
            patched.end_date = Some(end);
        }
        patched.validate()?;
        *self = patched;
        Ok(())
    }
}

/// Input model for creating a new possession.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPossession {
    #[serde(default)]
    pub owner: Option<String>,
    pub label: String,
    pub initial_value: Decimal,
    #[serde(with = "flexible_date")]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub amortization_rate: Option<Decimal>,
    #[serde(default)]
    pub asset_type: AssetType,
    #[serde(default)]
    pub type_specific_fields: Map<String, Value>,
}

impl NewPossession {
    /// Builds the open record, falling back to the default holder when no
    /// owner was given.
    pub fn into_possession(self) -> Result<Possession> {
        let owner = self
            .owner
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        let possession = Possession {
            owner,
            label: self.label.trim().to_string(),
            initial_value: self.initial_value,
            start_date: self.start_date,
            end_date: None,
            amortization_rate: self.amortization_rate,
            asset_type: self.asset_type,
            type_specific_fields: self.type_specific_fields,
        };
        possession.validate()?;
        Ok(possession)
    }
}

/// Partial update of a possession.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PossessionPatch {
    #[serde(default)]
    pub initial_value: Option<Decimal>,
    #[serde(default)]
    pub amortization_rate: Option<Decimal>,
    #[serde(default, with = "flexible_date::option")]
    pub end_date: Option<NaiveDate>,
}

impl PossessionPatch {
    pub fn is_empty(&self) -> bool {
        self.initial_value.is_none() && self.amortization_rate.is_none() && self.end_date.is_none()
    }
}

/// Picks the record a label refers to within one owner's possessions.
///
/// The open record wins; otherwise the closed one that started last.
pub fn find_by_label<'a>(
    possessions: &'a [Possession],
    owner: &str,
    label: &str,
) -> Option<&'a Possession> {
    select_by_label(possessions, owner, label, None)
}

/// Like [`find_by_label`], narrowed to records that started on `started_on`
/// when given. Reaches a closed record whose label was reused by an open one.
pub fn select_by_label<'a>(
    possessions: &'a [Possession],
    owner: &str,
    label: &str,
    started_on: Option<NaiveDate>,
) -> Option<&'a Possession> {
    let matching = possessions.iter().filter(|p| {
        p.owner == owner && p.label == label && started_on.map_or(true, |d| p.start_date == d)
    });
    let mut best: Option<&Possession> = None;
    for candidate in matching {
        if candidate.is_open() {
            return Some(candidate);
        }
        if best.map_or(true, |b| candidate.start_date >= b.start_date) {
            best = Some(candidate);
        }
    }
    best
}

/// Same lookup as [`select_by_label`], returning the index into the slice.
pub fn position_by_label(
    possessions: &[Possession],
    owner: &str,
    label: &str,
    started_on: Option<NaiveDate>,
) -> Option<usize> {
    let target = select_by_label(possessions, owner, label, started_on)?;
    possessions.iter().position(|p| std::ptr::eq(p, target))
}
