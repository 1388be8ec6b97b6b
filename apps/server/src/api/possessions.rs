use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use patrimoine_core::{
    utils::time_utils::valuation_date_today, NewPossession, Possession, PossessionPatch,
    PossessionValuation,
};

use super::shared::{parse_date, OwnerQuery};

async fn list_possessions(
    State(state): State<Arc<AppState>>,
    Query(q): Query<OwnerQuery>,
) -> ApiResult<Json<Vec<Possession>>> {
    let possessions = state.possession_service.list_possessions(q.filter())?;
    Ok(Json(possessions))
}

async fn create_possession(
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<NewPossession>,
) -> ApiResult<(StatusCode, Json<Possession>)> {
    if payload.owner.as_deref().map_or(true, |o| o.trim().is_empty()) {
        payload.owner = Some(state.default_owner.clone());
    }
    let created = state.possession_service.create_possession(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordQuery {
    owner: Option<String>,
    /// Start date of the record to patch, for labels reused after a close
    start_date: Option<String>,
}

async fn update_possession(
    Path(label): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<RecordQuery>,
    Json(payload): Json<PossessionPatch>,
) -> ApiResult<Json<Possession>> {
    let started_on = q
        .start_date
        .as_deref()
        .map(|d| parse_date(d, "startDate"))
        .transpose()?;
    let owner_query = OwnerQuery { owner: q.owner };
    let owner = owner_query.owner_or(&state.default_owner);
    let updated = state
        .possession_service
        .update_possession(owner, &label, started_on, payload)
        .await?;
    Ok(Json(updated))
}

async fn close_possession(
    Path(label): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<OwnerQuery>,
) -> ApiResult<Json<Possession>> {
    let owner = q.owner_or(&state.default_owner);
    let closed = state
        .possession_service
        .close_possession(owner, &label, valuation_date_today())
        .await?;
    Ok(Json(closed))
}

async fn delete_possession(
    Path(label): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<OwnerQuery>,
) -> ApiResult<StatusCode> {
    let owner = q.owner_or(&state.default_owner);
    state
        .possession_service
        .delete_possession(owner, &label)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_possession_value(
    Path((label, date)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<OwnerQuery>,
) -> ApiResult<Json<PossessionValuation>> {
    let date = parse_date(&date, "date")?;
    let owner = q.owner_or(&state.default_owner);
    let valuation = state
        .patrimoine_service
        .get_possession_value(owner, &label, date)?;
    Ok(Json(valuation))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/possession",
            get(list_possessions).post(create_possession),
        )
        .route(
            "/possession/{label}",
            patch(update_possession).delete(delete_possession),
        )
        .route("/possession/{label}/close", patch(close_possession))
        .route(
            "/possession/{label}/value/{date}",
            get(get_possession_value),
        )
}
