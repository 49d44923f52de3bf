pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ingredients/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/ingredients/:id",
            patch(handlers::update_ingredient).delete(handlers::delete_ingredient),
        )
}
