use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use time::{Date, OffsetDateTime};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::nutrition::daily::{bucket_history, sum_meals, HISTORY_FETCH_MULTIPLIER};
use crate::nutrition::portion;
use crate::nutrition::vector::round1;
use crate::state::AppState;

use super::dto::{DailySummary, HistoryDay, HistoryQuery, MealCreate, MealPortionUpdate};
use super::repo::{Meal, NewMeal};

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(day): Path<Date>,
) -> Result<Json<DailySummary>, ApiError> {
    let meals = Meal::list_for_day(&state.db, user_id, day).await?;
    let totals = sum_meals(meals.iter().map(Meal::macros));
    Ok(Json(DailySummary {
        date: day,
        total_calories: totals.calories,
        total_protein: totals.protein_g,
        total_carbs: totals.carbs_g,
        total_fat: totals.fat_g,
        total_fiber: totals.fiber_g,
        meals,
    }))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MealCreate>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    body.validate()?;
    let logged_date = body
        .logged_date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let meal = Meal::insert(
        &state.db,
        user_id,
        &NewMeal {
            logged_date,
            meal_type: &body.meal_type,
            name: &body.name,
            calories: body.calories,
            protein_g: body.protein_g,
            carbs_g: body.carbs_g,
            fat_g: body.fat_g,
            fiber_g: body.fiber_g,
            notes: body.notes.as_deref(),
            raw_weight: None,
            total_cooked_weight: None,
            portion_weight: None,
            recipe_id: None,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state, body))]
pub async fn update_portion(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MealPortionUpdate>,
) -> Result<Json<Meal>, ApiError> {
    if body.portion_weight <= 0.0 {
        return Err(ApiError::validation("portion_weight must be > 0"));
    }

    let meal = Meal::get_owned(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Meal not found"))?;

    let rescaled = portion::rescale(
        meal.macros().into(),
        meal.total_cooked_weight,
        meal.portion_weight,
        body.portion_weight,
    );

    let updated = Meal::update_portion(
        &state.db,
        user_id,
        id,
        round1(body.portion_weight),
        rescaled,
    )
    .await?
    .ok_or(ApiError::WriteFailed("Failed to update meal"))?;

    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if Meal::delete_owned(&state.db, user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Meal not found"))
    }
}

#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryDay>>, ApiError> {
    let limit = q.limit.max(1);
    let rows = Meal::history_rows(&state.db, user_id, limit * HISTORY_FETCH_MULTIPLIER).await?;

    let history = bucket_history(
        rows.into_iter().map(|r| r.into_parts()),
        limit as usize,
    )
    .into_iter()
    .map(|(date, totals)| HistoryDay {
        date,
        calories: totals.calories,
        protein_g: totals.protein_g,
        carbs_g: totals.carbs_g,
        fat_g: totals.fat_g,
        fiber_g: totals.fiber_g,
    })
    .collect();

    Ok(Json(history))
}
