//! Role API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::role::{self, RoleWrite};
use crate::utils::validation::{normalize_optional_text, validate_payload};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::MutationResult;
use shared::models::{Page, PageQuery, PrivilegeRef, Role, RoleCreate, RoleDetail, RoleOption, RoleUpdate};
use shared::util::title_case;

fn role_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::RoleNotFound, format!("Role {id} not found"))
}

fn role_name_exists(name: &str) -> AppError {
    AppError::with_message(ErrorCode::RoleNameExists, format!("Role {name} already exists"))
        .with_detail("name", name)
}

/// Deduplicated privilege ids in request order
fn privilege_ids(actions: &[PrivilegeRef]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(actions.len());
    for action in actions {
        if !ids.contains(&action.privilege_id) {
            ids.push(action.privilege_id);
        }
    }
    ids
}

/// GET /api/v1/user/access - 角色分页列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Role>>> {
    let (items, total) = role::list(&state.pool, &query).await?;
    Ok(Json(Page::new(items, &query, total)))
}

/// GET /api/v1/user/access/options - 角色下拉选项
pub async fn options(State(state): State<ServerState>) -> AppResult<Json<Vec<RoleOption>>> {
    Ok(Json(role::find_options(&state.pool).await?))
}

/// GET /api/v1/user/access/{id} - 角色详情 (含授权)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RoleDetail>> {
    let role = role::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| role_not_found(id))?;
    let grants = role::find_grants(&state.pool, id).await?;
    Ok(Json(RoleDetail { role, grants }))
}

/// POST /api/v1/user/access - 创建角色
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(mut payload): Json<RoleCreate>,
) -> AppResult<Json<MutationResult>> {
    // 长度规则作用于规范化后的名称
    payload.name = title_case(&payload.name);
    validate_payload(&payload)?;

    let name = payload.name;
    if role::name_exists(&state.pool, &name, None).await? {
        return Err(role_name_exists(&name));
    }

    let data = RoleWrite {
        name,
        description: normalize_optional_text(payload.description.as_deref()).map(|d| title_case(&d)),
        status: 1,
        privilege_ids: privilege_ids(&payload.actions),
    };
    let id = role::create(&state.pool, &data, Some(user.id), state.now_secs()).await?;
    state.resolver.clear_cache().await;

    tracing::info!(role_id = id, role = %data.name, operator = user.id, "Role created");
    Ok(Json(MutationResult::new(id, "Role created")))
}

/// PUT /api/v1/user/access - 修改角色并替换授权
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(mut payload): Json<RoleUpdate>,
) -> AppResult<Json<MutationResult>> {
    payload.name = title_case(&payload.name);
    validate_payload(&payload)?;

    if role::find_by_id(&state.pool, payload.id).await?.is_none() {
        return Err(role_not_found(payload.id));
    }

    let name = payload.name.clone();
    if role::name_exists(&state.pool, &name, Some(payload.id)).await? {
        return Err(role_name_exists(&name));
    }

    let data = RoleWrite {
        name,
        description: normalize_optional_text(payload.description.as_deref()).map(|d| title_case(&d)),
        status: payload.status,
        privilege_ids: privilege_ids(&payload.actions),
    };
    role::update(&state.pool, payload.id, &data, Some(user.id), state.now_secs()).await?;
    state.resolver.clear_cache().await;

    tracing::info!(role_id = payload.id, role = %data.name, operator = user.id, "Role updated");
    Ok(Json(MutationResult::new(payload.id, "Role updated")))
}
