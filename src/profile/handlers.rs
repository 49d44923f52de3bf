use axum::{extract::State, Json};
use tracing::instrument;

use crate::auth::extractors::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::ProfileUpdate;
use super::repo::Profile;

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    let profile = Profile::get(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(profile))
}

#[instrument(skip(state, body))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    body.validate()?;
    let profile = Profile::update(&state.db, user_id, &body)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(profile))
}
