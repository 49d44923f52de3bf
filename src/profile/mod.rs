pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile/",
        get(handlers::get_profile).patch(handlers::update_profile),
    )
}
