use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{instrument, warn};

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{FoodSearchResult, SearchQuery, UpcFoodResult};

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<FoodSearchResult>>, ApiError> {
    if q.query.trim().is_empty() {
        return Err(ApiError::validation("query must not be empty"));
    }
    let results = state.foods.search(&q.query).await.map_err(|e| {
        warn!(error = %e, "food search failed");
        ApiError::upstream("USDA API request failed")
    })?;
    Ok(Json(results))
}

#[instrument(skip(state))]
pub async fn lookup_upc(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(code): Path<String>,
) -> Result<Json<UpcFoodResult>, ApiError> {
    let result = state.foods.lookup_upc(&code).await.map_err(|e| {
        warn!(error = %e, code, "upc lookup failed");
        ApiError::upstream("Food database request failed")
    })?;
    result
        .map(Json)
        .ok_or(ApiError::NotFound("Food not found"))
}
