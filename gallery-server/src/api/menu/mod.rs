//! Menu Administration Routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/v1/master/menu",
            get(handler::tree).patch(handler::update),
        )
        .route("/api/v1/master/menu/{id}", get(handler::get_by_id))
}
