use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route("/home", get(handlers::home))
        .route(
            "/universities",
            get(handlers::get_universities).post(handlers::create_university_with_categories),
        )
        .route(
            "/universities/{id}",
            delete(handlers::remove_university)
                .patch(handlers::update_university)
                .get(handlers::get_university_by_id),
        )
}
