//! 认证持久层接口
//!
//! 登录、会话校验和权限解析只通过 [`AuthStore`] 访问数据，
//! 生产环境使用 [`DbStore`]，测试可替换为内存实现。

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db::repository::account::{AccountCredential, AccountProfile};
use crate::db::repository::{RepoResult, account, device, menu, permission, session};
use shared::models::{DeviceInfo, MenuRow, RouteGrant};

/// 认证相关的数据访问
#[async_trait]
pub trait AuthStore: Send + Sync + std::fmt::Debug {
    /// 按用户名 (区分大小写) 查找启用账号，角色也须启用
    async fn find_credential(&self, username: &str) -> RepoResult<Option<AccountCredential>>;

    async fn find_profile(&self, account_id: i64) -> RepoResult<Option<AccountProfile>>;

    /// 角色可访问的第一个页面路径
    async fn first_menu_path(&self, access_id: i64) -> RepoResult<Option<String>>;

    async fn find_session(&self, account_id: i64) -> RepoResult<Option<String>>;

    async fn upsert_session(&self, account_id: i64, session_id: &str, now: i64) -> RepoResult<()>;

    async fn upsert_device(&self, account_id: i64, device: &DeviceInfo, now: i64)
    -> RepoResult<()>;

    /// 账号可见的菜单行 (含祖先分组)，只带已授予的权限
    async fn menu_rows_for_account(&self, account_id: i64) -> RepoResult<Vec<MenuRow>>;

    /// 账号当前的启用角色名 (不信任令牌里的角色)
    async fn current_access_name(&self, account_id: i64) -> RepoResult<Option<String>>;

    /// 角色被授予的 `(菜单, 动作, 路由)`，按存储顺序
    async fn route_grants(&self, access_name: &str) -> RepoResult<Vec<RouteGrant>>;
}

/// SQLite 实现
#[derive(Debug, Clone)]
pub struct DbStore {
    pool: SqlitePool,
}

impl DbStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStore for DbStore {
    async fn find_credential(&self, username: &str) -> RepoResult<Option<AccountCredential>> {
        account::find_credential(&self.pool, username).await
    }

    async fn find_profile(&self, account_id: i64) -> RepoResult<Option<AccountProfile>> {
        account::find_profile(&self.pool, account_id).await
    }

    async fn first_menu_path(&self, access_id: i64) -> RepoResult<Option<String>> {
        menu::first_path_for_access(&self.pool, access_id).await
    }

    async fn find_session(&self, account_id: i64) -> RepoResult<Option<String>> {
        session::find(&self.pool, account_id).await
    }

    async fn upsert_session(&self, account_id: i64, session_id: &str, now: i64) -> RepoResult<()> {
        session::upsert(&self.pool, account_id, session_id, now).await
    }

    async fn upsert_device(
        &self,
        account_id: i64,
        device: &DeviceInfo,
        now: i64,
    ) -> RepoResult<()> {
        device::upsert(&self.pool, account_id, device, now).await
    }

    async fn menu_rows_for_account(&self, account_id: i64) -> RepoResult<Vec<MenuRow>> {
        menu::find_rows_for_account(&self.pool, account_id).await
    }

    async fn current_access_name(&self, account_id: i64) -> RepoResult<Option<String>> {
        account::find_active_access_name(&self.pool, account_id).await
    }

    async fn route_grants(&self, access_name: &str) -> RepoResult<Vec<RouteGrant>> {
        permission::find_route_grants(&self.pool, access_name).await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// 内存实现，记录路由授权查询次数
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        pub credentials: Vec<AccountCredential>,
        pub first_paths: HashMap<i64, String>,
        pub menu_rows: Vec<MenuRow>,
        pub grants: HashMap<String, Vec<RouteGrant>>,
        pub sessions: Mutex<HashMap<i64, String>>,
        pub devices: Mutex<HashMap<i64, DeviceInfo>>,
        grant_queries: AtomicUsize,
    }

    impl MemoryStore {
        pub fn grant_queries(&self) -> usize {
            self.grant_queries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AuthStore for MemoryStore {
        async fn find_credential(&self, username: &str) -> RepoResult<Option<AccountCredential>> {
            Ok(self
                .credentials
                .iter()
                .find(|c| c.username == username)
                .cloned())
        }

        async fn find_profile(&self, account_id: i64) -> RepoResult<Option<AccountProfile>> {
            Ok(self
                .credentials
                .iter()
                .find(|c| c.id == account_id)
                .map(|c| AccountProfile {
                    id: c.id,
                    name: c.fullname.clone(),
                    access_name: c.access_name.clone(),
                }))
        }

        async fn first_menu_path(&self, access_id: i64) -> RepoResult<Option<String>> {
            Ok(self.first_paths.get(&access_id).cloned())
        }

        async fn find_session(&self, account_id: i64) -> RepoResult<Option<String>> {
            Ok(self.sessions.lock().unwrap().get(&account_id).cloned())
        }

        async fn upsert_session(
            &self,
            account_id: i64,
            session_id: &str,
            _now: i64,
        ) -> RepoResult<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(account_id, session_id.to_string());
            Ok(())
        }

        async fn upsert_device(
            &self,
            account_id: i64,
            device: &DeviceInfo,
            _now: i64,
        ) -> RepoResult<()> {
            self.devices
                .lock()
                .unwrap()
                .insert(account_id, device.clone());
            Ok(())
        }

        async fn menu_rows_for_account(&self, _account_id: i64) -> RepoResult<Vec<MenuRow>> {
            Ok(self.menu_rows.clone())
        }

        async fn current_access_name(&self, account_id: i64) -> RepoResult<Option<String>> {
            Ok(self
                .credentials
                .iter()
                .find(|c| c.id == account_id)
                .map(|c| c.access_name.clone()))
        }

        async fn route_grants(&self, access_name: &str) -> RepoResult<Vec<RouteGrant>> {
            self.grant_queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.grants.get(access_name).cloned().unwrap_or_default())
        }
    }
}
