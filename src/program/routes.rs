use axum::{
    Router,
    routing::{get, patch},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route(
            "/universities/{id}/programs",
            get(handlers::get_programs_for_university).post(handlers::create_program),
        )
        .route(
            "/programs/{id}",
            patch(handlers::update_program).delete(handlers::remove_program),
        )
}
