pub mod client;
pub mod dto;
pub mod handlers;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/usda/search", get(handlers::search_foods))
        .route("/usda/upc/:code", get(handlers::lookup_upc))
}
