pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes/",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(handlers::get_recipe)
                .patch(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route("/recipes/:id/ingredients", post(handlers::add_ingredient))
        .route(
            "/recipes/:id/ingredients/:ingredient_id",
            patch(handlers::update_ingredient).delete(handlers::remove_ingredient),
        )
        .route("/recipes/:id/log", post(handlers::log_recipe))
        .route(
            "/recipes/:id/restore-from-meal/:meal_id",
            post(handlers::restore_from_meal),
        )
}
