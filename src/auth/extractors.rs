use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Validates the bearer token through the identity collaborator and yields
/// the caller's user id. Runs before any data access.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::unauthorized("Invalid auth scheme"))?;

        match state.identity.get_user(token).await {
            Ok(Some(user)) => Ok(AuthUser(user.id)),
            Ok(None) => Err(ApiError::unauthorized("Invalid or expired token")),
            Err(e) => {
                warn!(error = %e, "identity service unavailable");
                Err(ApiError::unauthorized("Could not validate credentials"))
            }
        }
    }
}
