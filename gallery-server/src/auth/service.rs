//! 认证服务
//!
//! 登录、当前用户、调用者可见的菜单树。

use std::sync::Arc;

use shared::client::{LoginRequest, LoginResponse, MeResponse};
use shared::models::MenuNode;

use crate::auth::{AuthStore, Clock, CurrentUser, SessionManager, verify_credentials};
use crate::menu::build_menu_tree;
use crate::security_log;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AuthService {
    store: Arc<dyn AuthStore>,
    sessions: SessionManager,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(store: Arc<dyn AuthStore>, sessions: SessionManager, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            sessions,
            clock,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// 校验凭证、签发会话并记录设备
    ///
    /// 角色没有可导航的菜单时在签发令牌前拒绝，不写指纹。
    pub async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        validate_payload(req)?;

        let account = verify_credentials(self.store.as_ref(), &req.user, &req.password).await?;

        let Some(redirect_to) = self.store.first_menu_path(account.access_id).await? else {
            security_log!(
                "WARN",
                "login_no_menu",
                account_id = account.id,
                access_name = account.access_name.clone()
            );
            return Err(AppError::no_accessible_menu());
        };

        let access_token = self.sessions.issue(&account).await?;

        self.store
            .upsert_device(account.id, &req.device, self.clock.now_secs())
            .await?;

        tracing::info!(
            account_id = account.id,
            username = %account.username,
            access_name = %account.access_name,
            "Account logged in"
        );

        Ok(LoginResponse {
            access_token,
            redirect_to,
        })
    }

    pub async fn me(&self, user: &CurrentUser) -> AppResult<MeResponse> {
        let profile = self
            .store
            .find_profile(user.id)
            .await?
            .ok_or_else(AppError::unauthorized)?;

        Ok(MeResponse {
            id: profile.id,
            name: profile.name,
            access_name: profile.access_name,
        })
    }

    /// 调用者可见的菜单森林，只带已授予的动作
    pub async fn menu(&self, user: &CurrentUser) -> AppResult<Vec<MenuNode>> {
        let rows = self.store.menu_rows_for_account(user.id).await?;
        let tree = build_menu_tree(&rows);
        if tree.is_empty() {
            return Err(AppError::no_accessible_menu());
        }
        Ok(tree)
    }
}
