use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    days::{
        dto::{DayQuery, HourEntry, UpsertHourRequest, UpsertHourResponse},
        services,
    },
    error::ApiResult,
    state::AppState,
};

pub fn day_routes() -> Router<AppState> {
    Router::new().route("/day", get(get_day).post(upsert_hour))
}

/// GET /day?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<HourEntry>>> {
    let Query(q) = query?;
    let entries = services::get_day(state.store.as_ref(), &q.date).await?;
    Ok(Json(entries))
}

/// POST /day { date, hour, mood?, notes? }
#[instrument(skip(state, payload))]
pub async fn upsert_hour(
    State(state): State<AppState>,
    payload: Result<Json<UpsertHourRequest>, JsonRejection>,
) -> ApiResult<Json<UpsertHourResponse>> {
    let Json(payload) = payload?;
    let hour = services::upsert_hour(
        state.store.as_ref(),
        &payload.date,
        payload.hour,
        payload.mood,
        payload.notes,
    )
    .await?;

    info!(date = %payload.date, hour, "hour entry upserted");
    Ok(Json(UpsertHourResponse {
        status: "success",
        date: payload.date,
        hour,
    }))
}
