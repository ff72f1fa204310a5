use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route(
            "/users/{id}/saved",
            get(handlers::get_saved).post(handlers::toggle_save),
        )
        .route(
            "/users/{id}/saved/{university_id}/calculator",
            post(handlers::toggle_calculator),
        )
}
