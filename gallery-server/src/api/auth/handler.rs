//! Authentication Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;
use shared::client::{LoginRequest, LoginResponse, MeResponse, PermissionQuery};
use shared::models::{MenuNode, RoutePermission};

/// POST /api/v1/auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = state.auth.login(&req).await?;
    Ok(Json(resp))
}

/// GET /api/v1/auth/me - 当前用户
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<MeResponse>> {
    Ok(Json(state.auth.me(&user).await?))
}

/// GET /api/v1/auth/menu - 当前角色可见的菜单树
pub async fn menu(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<MenuNode>>> {
    Ok(Json(state.auth.menu(&user).await?))
}

/// GET /api/v1/auth/permission?path= - 路由动作权限
pub async fn permission(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<PermissionQuery>,
) -> AppResult<Json<RoutePermission>> {
    validate_payload(&query)?;
    let resolved = state
        .resolver
        .resolve(&query.path, user.id)
        .await?;
    Ok(Json(resolved))
}
