use chrono::NaiveDate;
use patrimoine_core::{errors::Error, utils::time_utils};

use crate::error::ApiResult;

#[derive(Debug, Default, serde::Deserialize)]
pub struct OwnerQuery {
    pub owner: Option<String>,
}

impl OwnerQuery {
    /// Owner to act on, falling back to `default` when absent or blank.
    pub fn owner_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.filter().unwrap_or(default)
    }

    /// Owner to filter reads by; `None` covers every owner.
    pub fn filter(&self) -> Option<&str> {
        self.owner
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

/// Parses a `YYYY-MM-DD` (or RFC 3339) request value named `field`.
pub fn parse_date(value: &str, field: &str) -> ApiResult<NaiveDate> {
    time_utils::parse_date(value).map_err(|e| match e {
        Error::InvalidDate(reason) => Error::InvalidDate(format!("{} {}", field, reason)).into(),
        other => other.into(),
    })
}
