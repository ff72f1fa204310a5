use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route("/register", post(handlers::register_user))
        .route("/login", post(handlers::login_user))
        .route(
            "/users/{id}/profile",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
}
