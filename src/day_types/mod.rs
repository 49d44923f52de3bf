pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, patch, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/day-types/",
            get(handlers::list_day_types).post(handlers::create_day_type),
        )
        .route(
            "/day-types/:id",
            patch(handlers::update_day_type).delete(handlers::delete_day_type),
        )
        .route(
            "/day-types/log/:date",
            put(handlers::set_day_log).delete(handlers::clear_day_log),
        )
}
