//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/v1/auth/login: public (no auth required)
/// - everything else: protected by the global require_auth middleware
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/v1/auth/login", post(handler::login))
        .route("/api/v1/auth/me", get(handler::me))
        .route("/api/v1/auth/menu", get(handler::menu))
        .route("/api/v1/auth/permission", get(handler::permission))
}
