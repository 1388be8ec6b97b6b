use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::valuation_strategy::{effective_date, ValuationStrategy};
use crate::constants::{DECIMAL_PRECISION, FLOW_AMOUNT_FIELD, FLOW_DAY_FIELD};
use crate::errors::{Error, Result, ValidationError};
use crate::possessions::Possession;
use crate::utils::time_utils::last_day_of_month;

/// Recurring monthly flow (salary, rent, subscription).
///
/// Reads `day` and `amount` from the possession's type-specific fields. The
/// value is the initial value plus `amount` for every monthly occurrence between
/// the start date and the effective date, floored at zero. Days past the end of
/// a short month fall on its last day.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlowStrategy;

impl FlowStrategy {
    fn day_of_month(fields: &Map<String, Value>) -> Result<u32> {
        let raw = fields
            .get(FLOW_DAY_FIELD)
            .ok_or_else(|| ValidationError::MissingField(FLOW_DAY_FIELD.to_string()))?;
        let day = match raw {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match day {
            Some(d @ 1..=31) => Ok(d as u32),
            _ => Err(Error::invalid_input(format!(
                "'{}' must be a day of month between 1 and 31, got {}",
                FLOW_DAY_FIELD, raw
            ))),
        }
    }

    fn amount(fields: &Map<String, Value>) -> Result<Decimal> {
        let raw = fields
            .get(FLOW_AMOUNT_FIELD)
            .ok_or_else(|| ValidationError::MissingField(FLOW_AMOUNT_FIELD.to_string()))?;
        let text = match raw {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => {
                return Err(Error::invalid_input(format!(
                    "'{}' must be a number, got {}",
                    FLOW_AMOUNT_FIELD, raw
                )))
            }
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(Error::from)
    }

    /// Number of monthly occurrences of `day` within `[start, end]`.
    fn count_occurrences(start: NaiveDate, end: NaiveDate, day: u32) -> Result<u32> {
        if end < start {
            return Ok(0);
        }
        let first_month = start
            .with_day(1)
            .ok_or_else(|| Error::InvalidDate(start.to_string()))?;
        let month_span = (end.year() - start.year()) * 12 + end.month() as i32
            - start.month() as i32;

        let mut count = 0;
        for offset in 0..=month_span as u32 {
            let month = first_month
                .checked_add_months(Months::new(offset))
                .ok_or_else(|| Error::InvalidDate(format!("month overflow after {}", start)))?;
            let occurrence_day = day.min(last_day_of_month(month)?);
            let occurrence = month
                .with_day(occurrence_day)
                .ok_or_else(|| Error::InvalidDate(month.to_string()))?;
            if occurrence >= start && occurrence <= end {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl ValuationStrategy for FlowStrategy {
    fn name(&self) -> &'static str {
        "monthly_flow"
    }

    fn value_at(&self, possession: &Possession, target_date: NaiveDate) -> Result<Decimal> {
        let day = Self::day_of_month(&possession.type_specific_fields)?;
        let amount = Self::amount(&possession.type_specific_fields)?;

        let effective = effective_date(possession, target_date);
        if effective < possession.start_date {
            return Ok(possession.initial_value);
        }

        let occurrences = Self::count_occurrences(possession.start_date, effective, day)?;
        let accrued = amount
            .checked_mul(Decimal::from(occurrences))
            .and_then(|flow| possession.initial_value.checked_add(flow))
            .ok_or_else(|| {
                Error::invalid_input(format!("flow '{}' overflows", possession.label))
            })?;

        Ok(accrued.max(Decimal::ZERO).round_dp(DECIMAL_PRECISION))
    }
}
