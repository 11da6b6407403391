//! Role ("access") Administration Routes
//!
//! Every write replaces the role's grants and clears the route permission
//! cache.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/v1/user/access",
            get(handler::list).post(handler::create).put(handler::update),
        )
        .route("/api/v1/user/access/options", get(handler::options))
        .route("/api/v1/user/access/{id}", get(handler::get_by_id))
}
