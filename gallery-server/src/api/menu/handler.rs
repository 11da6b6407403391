//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::menu;
use crate::menu::build_menu_tree;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::MutationResult;
use shared::models::{Menu, MenuNode, MenuUpdate};

/// GET /api/v1/master/menu - 全部菜单树 (含全部动作)
pub async fn tree(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuNode>>> {
    let rows = menu::find_all_rows(&state.pool).await?;
    Ok(Json(build_menu_tree(&rows)))
}

/// GET /api/v1/master/menu/{id} - 菜单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Menu>> {
    let m = menu::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::MenuNotFound, format!("Menu {id} not found")))?;
    Ok(Json(m))
}

/// PATCH /api/v1/master/menu - 修改名称、排序、状态
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(mut payload): Json<MenuUpdate>,
) -> AppResult<Json<MutationResult>> {
    payload.name = payload.name.trim().to_string();
    validate_payload(&payload)?;

    if menu::find_by_id(&state.pool, payload.id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::MenuNotFound,
            format!("Menu {} not found", payload.id),
        ));
    }

    menu::update(&state.pool, &payload, state.now_secs()).await?;
    state.resolver.clear_cache().await;

    tracing::info!(menu_id = payload.id, operator = user.id, "Menu updated");
    Ok(Json(MutationResult::new(payload.id, "Menu updated")))
}
