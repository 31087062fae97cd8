use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::ApiResult,
    recipes::{
        dto::{CreateRecipeRequest, CreateRecipeResponse, RecipeDetails},
        services,
    },
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipe", post(create_recipe))
        .route("/recipe/:name", get(get_recipe))
}

/// POST /recipe { name, food_fdc_ids }
#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateRecipeResponse>)> {
    let Json(payload) = payload?;
    services::save_recipe(state.store.as_ref(), &payload.name, &payload.food_fdc_ids).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateRecipeResponse {
            message: format!("Recipe '{}' saved", payload.name),
        }),
    ))
}

/// GET /recipe/:name
#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RecipeDetails>> {
    let details = services::get_recipe(state.store.as_ref(), &state.catalog, &name).await?;
    Ok(Json(details))
}
