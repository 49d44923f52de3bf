use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use time::Date;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{DayLogSet, DayTypeCreate, DayTypeUpdate};
use super::repo::{DayLog, DayType};

#[instrument(skip(state))]
pub async fn list_day_types(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<DayType>>, ApiError> {
    Ok(Json(DayType::list_owned(&state.db, user_id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_day_type(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<DayTypeCreate>,
) -> Result<(StatusCode, Json<DayType>), ApiError> {
    body.validate()?;
    let day_type = DayType::insert(&state.db, user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(day_type)))
}

#[instrument(skip(state, body))]
pub async fn update_day_type(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DayTypeUpdate>,
) -> Result<Json<DayType>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::validation("No fields to update"));
    }
    let day_type = DayType::update(&state.db, user_id, id, &body)
        .await?
        .ok_or(ApiError::NotFound("Day type not found"))?;
    Ok(Json(day_type))
}

#[instrument(skip(state))]
pub async fn delete_day_type(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if DayType::delete_owned(&state.db, user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Day type not found"))
    }
}

#[instrument(skip(state, body))]
pub async fn set_day_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(logged_date): Path<Date>,
    Json(body): Json<DayLogSet>,
) -> Result<Json<DayType>, ApiError> {
    // The assigned day type must belong to the caller.
    let day_type = DayType::get_owned(&state.db, user_id, body.day_type_id)
        .await?
        .ok_or(ApiError::NotFound("Day type not found"))?;

    DayLog::upsert(&state.db, user_id, logged_date, day_type.id).await?;
    Ok(Json(day_type))
}

#[instrument(skip(state))]
pub async fn clear_day_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(logged_date): Path<Date>,
) -> Result<StatusCode, ApiError> {
    if DayLog::clear(&state.db, user_id, logged_date).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("No day type assigned for that date"))
    }
}
