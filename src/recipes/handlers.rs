use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::meals::repo::Meal;
use crate::state::AppState;

use super::dto::{
    RecipeCreate, RecipeIngredientAdd, RecipeIngredientUpdate, RecipeLogRequest, RecipeResponse,
    RecipeUpdate,
};
use super::repo::{Recipe, RecipeIngredient};
use super::services;

async fn get_recipe_or_404(
    state: &AppState,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<Recipe, ApiError> {
    Recipe::get_owned(&state.db, user_id, recipe_id)
        .await?
        .ok_or(ApiError::NotFound("Recipe not found"))
}

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<RecipeCreate>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    body.validate()?;
    let recipe = Recipe::insert(&state.db, user_id, &body.name, body.servings).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::build(recipe, Vec::new())),
    ))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = Recipe::list_owned(&state.db, user_id).await?;
    if recipes.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let recipe_ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
    let mut by_recipe: HashMap<Uuid, Vec<RecipeIngredient>> =
        recipe_ids.iter().map(|id| (*id, Vec::new())).collect();
    for ingredient in RecipeIngredient::list_for_recipes(&state.db, &recipe_ids).await? {
        by_recipe
            .entry(ingredient.recipe_id)
            .or_default()
            .push(ingredient);
    }

    let responses = recipes
        .into_iter()
        .map(|r| {
            let ingredients = by_recipe.remove(&r.id).unwrap_or_default();
            RecipeResponse::build(r, ingredients)
        })
        .collect();
    Ok(Json(responses))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = get_recipe_or_404(&state, user_id, recipe_id).await?;
    let ingredients = RecipeIngredient::list_for_recipe(&state.db, recipe_id).await?;
    Ok(Json(RecipeResponse::build(recipe, ingredients)))
}

#[instrument(skip(state, body))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<RecipeUpdate>,
) -> Result<Json<RecipeResponse>, ApiError> {
    if body.name.is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    get_recipe_or_404(&state, user_id, recipe_id).await?;
    let recipe = Recipe::rename(&state.db, recipe_id, &body.name)
        .await?
        .ok_or(ApiError::WriteFailed("Failed to update recipe"))?;
    let ingredients = RecipeIngredient::list_for_recipe(&state.db, recipe_id).await?;
    Ok(Json(RecipeResponse::build(recipe, ingredients)))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    get_recipe_or_404(&state, user_id, recipe_id).await?;
    Recipe::delete(&state.db, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn add_ingredient(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<RecipeIngredientAdd>,
) -> Result<(StatusCode, Json<RecipeIngredient>), ApiError> {
    body.validate()?;
    get_recipe_or_404(&state, user_id, recipe_id).await?;
    let ingredient = RecipeIngredient::insert(&state.db, recipe_id, &body).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

#[instrument(skip(state, body))]
pub async fn update_ingredient(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((recipe_id, ingredient_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<RecipeIngredientUpdate>,
) -> Result<Json<RecipeIngredient>, ApiError> {
    body.validate()?;
    get_recipe_or_404(&state, user_id, recipe_id).await?;
    let ingredient = RecipeIngredient::update(&state.db, recipe_id, ingredient_id, &body)
        .await?
        .ok_or(ApiError::NotFound("Ingredient not found"))?;
    Ok(Json(ingredient))
}

#[instrument(skip(state))]
pub async fn remove_ingredient(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((recipe_id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    get_recipe_or_404(&state, user_id, recipe_id).await?;
    if RecipeIngredient::delete(&state.db, recipe_id, ingredient_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Ingredient not found"))
    }
}

#[instrument(skip(state, body))]
pub async fn log_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<RecipeLogRequest>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    body.validate()?;
    let recipe = get_recipe_or_404(&state, user_id, recipe_id).await?;
    let meal = services::log_recipe(&state, user_id, &recipe, &body).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn restore_from_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((recipe_id, meal_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = get_recipe_or_404(&state, user_id, recipe_id).await?;

    // The meal must be the caller's and must have been logged from this
    // recipe.
    let meal = Meal::get_owned(&state.db, user_id, meal_id)
        .await?
        .filter(|m| m.recipe_id == Some(recipe_id))
        .ok_or(ApiError::NotFound("Meal not found"))?;

    let response = services::restore_from_meal(&state, recipe, meal.id).await?;
    Ok(Json(response))
}
