use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use patrimoine_core::{errors::Error, PatrimoinePoint, PatrimoineResponse};

use super::shared::{parse_date, OwnerQuery};

async fn get_patrimoine(
    Path(date): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<OwnerQuery>,
) -> ApiResult<Json<PatrimoineResponse>> {
    let date = parse_date(&date, "date")?;
    let response = state.patrimoine_service.get_patrimoine(q.filter(), date)?;
    Ok(Json(response))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatrimoineRangeBody {
    /// Start date in ISO format (YYYY-MM-DD)
    start_date: String,
    /// End date in ISO format (YYYY-MM-DD)
    end_date: String,
    step_days: u32,
    owner: Option<String>,
}

/// Rejects ranges that would produce more than `max_points` points.
fn check_series_size(
    start: NaiveDate,
    end: NaiveDate,
    step_days: u32,
    max_points: usize,
) -> Result<(), Error> {
    if step_days == 0 || end < start {
        // Reported by the aggregator
        return Ok(());
    }
    let points = (end - start).num_days() / i64::from(step_days) + 1;
    let allowed = i64::try_from(max_points).unwrap_or(i64::MAX);
    if points > allowed {
        return Err(Error::InvalidRange(format!(
            "{} points requested, at most {} allowed",
            points, max_points
        )));
    }
    Ok(())
}

async fn get_patrimoine_range(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PatrimoineRangeBody>,
) -> ApiResult<Json<Vec<PatrimoinePoint>>> {
    let start = parse_date(&body.start_date, "startDate")?;
    let end = parse_date(&body.end_date, "endDate")?;
    check_series_size(start, end, body.step_days, state.max_series_points)?;

    let owner = OwnerQuery { owner: body.owner };
    let series = state
        .patrimoine_service
        .get_patrimoine_range(owner.filter(), start, end, body.step_days)?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/patrimoine/range", post(get_patrimoine_range))
        .route("/patrimoine/{date}", get(get_patrimoine))
}
