use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::errors::{Error, Result};

/// The processing date used for lifecycle operations such as closing a possession.
pub fn valuation_date_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses a calendar date from user input.
///
/// Accepts plain `YYYY-MM-DD` dates and RFC 3339 timestamps (the date part is
/// kept, in UTC).
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| Error::InvalidDate(format!("'{}': {}", input, e)))
}

/// Shifts `date` forward by a whole number of years.
///
/// February 29th lands on February 28th in non-leap years.
pub fn add_years(date: NaiveDate, years: i32) -> Result<NaiveDate> {
    let months = u32::try_from(years)
        .ok()
        .and_then(|y| y.checked_mul(12))
        .ok_or_else(|| Error::InvalidDate(format!("cannot add {} years to {}", years, date)))?;
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| Error::InvalidDate(format!("cannot add {} years to {}", years, date)))
}

/// Calendar-based year fraction between two dates.
///
/// Whole anniversaries count as full years; the remainder is the share of the
/// current anniversary year already elapsed. The result is negative when `end`
/// precedes `start`.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> Result<Decimal> {
    if end < start {
        return years_between(end, start).map(|years| -years);
    }

    let mut whole = end.year() - start.year();
    let mut anniversary = add_years(start, whole)?;
    if anniversary > end {
        whole -= 1;
        anniversary = add_years(start, whole)?;
    }
    let next_anniversary = add_years(start, whole + 1)?;

    let elapsed_days = (end - anniversary).num_days();
    let year_length = (next_anniversary - anniversary).num_days();

    Ok(Decimal::from(whole) + Decimal::from(elapsed_days) / Decimal::from(year_length))
}

/// Last day of the month `date` falls in.
pub fn last_day_of_month(date: NaiveDate) -> Result<u32> {
    let first = date.with_day(1).ok_or_else(|| Error::InvalidDate(date.to_string()))?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .ok_or_else(|| Error::InvalidDate(format!("no month end after {}", date)))
}

/// Dates from `start` to `end` inclusive, `step_days` apart.
///
/// The last date is `end` itself or the closest step before it. Returns an empty
/// vector when `start > end` or `step_days` is zero.
pub fn get_dates_stepped(start: NaiveDate, end: NaiveDate, step_days: u32) -> Vec<NaiveDate> {
    if start > end || step_days == 0 {
        return Vec::new();
    }
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.checked_add_days(Days::new(u64::from(step_days))) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Serde helpers accepting either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Files written by older front-ends store ISO timestamps for close dates.
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDate;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.filter(|s| !s.trim().is_empty())
                .map(|s| super::super::parse_date(&s).map_err(de::Error::custom))
                .transpose()
        }
    }
}
