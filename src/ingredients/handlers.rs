use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{IngredientCreate, IngredientUpdate};
use super::repo::Ingredient;

// The catalog is global: reads and writes are open to any authenticated
// caller. TODO: restrict writes to admin users once a roles system exists.

#[instrument(skip(state))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    Ok(Json(Ingredient::list(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn create_ingredient(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(body): Json<IngredientCreate>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    body.validate()?;
    let ingredient = Ingredient::insert(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

#[instrument(skip(state, body))]
pub async fn update_ingredient(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<IngredientUpdate>,
) -> Result<Json<Ingredient>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }
    let ingredient = Ingredient::update(&state.db, id, &body)
        .await?
        .ok_or(ApiError::NotFound("Ingredient not found"))?;
    Ok(Json(ingredient))
}

#[instrument(skip(state))]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if Ingredient::delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Ingredient not found"))
    }
}
