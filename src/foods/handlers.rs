use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    foods::dto::{FoodQuery, FoodSummary, DEFAULT_SEARCH_LIMIT},
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new().route("/foods", get(list_foods))
}

/// GET /foods, optionally narrowed with `?q=<text>`; at most `limit` items.
#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    query: Result<Query<FoodQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<FoodSummary>>> {
    let Query(query) = query?;
    if state.catalog.is_empty() {
        warn!("food catalog requested but not loaded");
        return Err(ApiError::NotFound("Food catalog not loaded".into()));
    }

    let items = match query.q.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(q) => state
            .catalog
            .search(q, query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
            .into_iter()
            .map(FoodSummary::from)
            .collect(),
        None => state
            .catalog
            .foods()
            .iter()
            .take(query.limit.unwrap_or(usize::MAX))
            .map(FoodSummary::from)
            .collect(),
    };
    Ok(Json(items))
}
