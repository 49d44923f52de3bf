pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meals/", post(handlers::create_meal))
        .route("/meals/day/:date", get(handlers::get_day))
        .route("/meals/history", get(handlers::get_history))
        .route("/meals/:id", delete(handlers::delete_meal))
        .route("/meals/:id/portion", patch(handlers::update_portion))
}
