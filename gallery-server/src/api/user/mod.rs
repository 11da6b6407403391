//! Account Administration Routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/v1/user",
            get(handler::profile).post(handler::create).put(handler::update),
        )
        .route("/api/v1/user/list", get(handler::list))
        .route("/api/v1/user/{id}", get(handler::get_by_id))
}
