//! Account API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::repository::account::{self, NewAccount};
use crate::db::repository::role;
use crate::utils::validation::{normalize_optional_text, normalize_phone, validate_payload};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::client::MutationResult;
use shared::models::{Account, AccountCreate, AccountUpdate, Page, PageQuery};
use shared::util::title_case;

fn account_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::AccountNotFound, format!("Account {id} not found"))
}

async fn ensure_role_exists(state: &ServerState, access_id: i64) -> AppResult<()> {
    if role::find_by_id(&state.pool, access_id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::RoleNotFound,
            format!("Role {access_id} not found"),
        ));
    }
    Ok(())
}

/// GET /api/v1/user - 当前账号资料
pub async fn profile(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Account>> {
    let account = account::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| account_not_found(user.id))?;
    Ok(Json(account))
}

/// GET /api/v1/user/list - 账号分页列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Account>>> {
    let (items, total) = account::list(&state.pool, &query).await?;
    Ok(Json(Page::new(items, &query, total)))
}

/// GET /api/v1/user/{id} - 账号详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Account>> {
    let account = account::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| account_not_found(id))?;
    Ok(Json(account))
}

/// POST /api/v1/user - 创建账号
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(mut payload): Json<AccountCreate>,
) -> AppResult<Json<MutationResult>> {
    payload.username = payload.username.trim().to_string();
    payload.fullname = title_case(&payload.fullname);
    validate_payload(&payload)?;

    let username = payload.username;
    if account::username_exists(&state.pool, &username).await? {
        return Err(AppError::with_message(
            ErrorCode::UsernameExists,
            format!("Username {username} already exists"),
        )
        .with_detail("username", username));
    }
    ensure_role_exists(&state, payload.access_id).await?;

    let data = NewAccount {
        access_id: payload.access_id,
        username,
        password_hash: hash_password(payload.password).await?,
        fullname: payload.fullname,
        email: normalize_optional_text(payload.email.as_deref()),
        phone: normalize_phone(payload.phone.as_deref())?,
    };
    let id = account::create(&state.pool, data, Some(user.id), state.now_secs()).await?;

    tracing::info!(account_id = id, operator = user.id, "Account created");
    Ok(Json(MutationResult::new(id, "Account created")))
}

/// PUT /api/v1/user - 修改账号
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(mut payload): Json<AccountUpdate>,
) -> AppResult<Json<MutationResult>> {
    payload.fullname = title_case(&payload.fullname);
    validate_payload(&payload)?;

    if account::find_by_id(&state.pool, payload.id).await?.is_none() {
        return Err(account_not_found(payload.id));
    }
    ensure_role_exists(&state, payload.access_id).await?;

    let phone = normalize_phone(payload.phone.as_deref())?;
    account::update(
        &state.pool,
        &payload,
        &payload.fullname,
        phone.as_deref(),
        Some(user.id),
        state.now_secs(),
    )
    .await?;

    tracing::info!(account_id = payload.id, operator = user.id, "Account updated");
    Ok(Json(MutationResult::new(payload.id, "Account updated")))
}
