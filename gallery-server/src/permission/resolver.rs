//! 路由权限解析
//!
//! 具体路径 + 调用者 → `{id: menuId, path, actions}`。角色每次都按账号从库里
//! 取，不用令牌里的角色名，所以换角色、改名对已登录的会话立即生效。
//! 授权按存储顺序返回，第一个匹配的模式决定菜单，该菜单上的所有授权
//! 合并成动作集。

use std::sync::Arc;
use std::time::Duration;

use shared::models::{PermissionActions, RoutePermission};

use crate::auth::AuthStore;
use crate::permission::{PermissionCache, RoutePattern, cache_key};
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// 路由权限解析器
#[derive(Debug, Clone)]
pub struct RouteResolver {
    store: Arc<dyn AuthStore>,
    cache: Arc<dyn PermissionCache>,
    ttl: Duration,
}

impl RouteResolver {
    pub fn new(store: Arc<dyn AuthStore>, cache: Arc<dyn PermissionCache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// 解析账号 `account_id` 当前角色对 `path` 的动作权限
    ///
    /// 账号或角色已停用、或没有任何匹配的授权时返回 `RouteForbidden` (403)。
    pub async fn resolve(&self, path: &str, account_id: i64) -> AppResult<RoutePermission> {
        let Some(access_name) = self.store.current_access_name(account_id).await? else {
            security_log!(
                "WARN",
                "route_forbidden_inactive",
                path = path,
                account_id = account_id
            );
            return Err(AppError::route_forbidden(path));
        };

        let key = cache_key(path, &access_name);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::trace!(%key, "Permission cache hit");
            return Ok(hit);
        }

        let grants = self.store.route_grants(&access_name).await?;

        let mut matched_menu = None;
        for grant in &grants {
            let pattern = match RoutePattern::compile(&grant.path) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(pattern = %grant.path, error = %e, "Skipping invalid route pattern");
                    continue;
                }
            };
            if pattern.matches(path) {
                matched_menu = Some(grant.menu_id);
                break;
            }
        }

        let Some(menu_id) = matched_menu else {
            security_log!(
                "WARN",
                "route_forbidden",
                path = path,
                access_name = access_name.as_str()
            );
            return Err(AppError::route_forbidden(path));
        };

        let mut actions = PermissionActions::default();
        for grant in grants.iter().filter(|g| g.menu_id == menu_id) {
            actions.grant(grant.action);
        }

        let descriptor = RoutePermission {
            id: menu_id,
            path: path.to_string(),
            actions,
        };
        self.cache.set(key, descriptor.clone(), self.ttl).await;

        Ok(descriptor)
    }

    /// 清空缓存
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        tracing::debug!("Permission cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::fake::MemoryStore;
    use crate::db::repository::account::AccountCredential;
    use crate::permission::MemoryPermissionCache;
    use shared::ErrorCode;
    use shared::models::{PrivilegeAction, RouteGrant};

    fn grant(menu_id: i64, action: PrivilegeAction, path: &str) -> RouteGrant {
        RouteGrant {
            menu_id,
            action,
            path: path.to_string(),
        }
    }

    const EDITOR: i64 = 1;
    const VIEWER: i64 = 2;

    fn account(id: i64, access_name: &str) -> AccountCredential {
        AccountCredential {
            id,
            access_id: id * 10,
            access_name: access_name.to_string(),
            username: access_name.to_lowercase(),
            fullname: access_name.to_string(),
            password: String::new(),
        }
    }

    fn editor_store() -> Arc<MemoryStore> {
        let mut store = MemoryStore::default();
        store.credentials.push(account(EDITOR, "Editor"));
        store.credentials.push(account(VIEWER, "Viewer"));
        store.grants.insert(
            "Editor".to_string(),
            vec![
                grant(5, PrivilegeAction::View, "/master/banner"),
                grant(5, PrivilegeAction::View, "/master/banner/:id"),
                grant(5, PrivilegeAction::Update, "/master/banner/:id/edit"),
                grant(6, PrivilegeAction::View, "/master/article"),
                grant(6, PrivilegeAction::Create, "/master/article/create"),
            ],
        );
        Arc::new(store)
    }

    fn resolver(store: Arc<MemoryStore>) -> RouteResolver {
        RouteResolver::new(
            store,
            Arc::new(MemoryPermissionCache::new()),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_actions_reduced_over_matched_menu() {
        let resolver = resolver(editor_store());

        let banner = resolver.resolve("/master/banner/7", EDITOR).await.unwrap();
        assert_eq!(banner.id, 5);
        assert_eq!(banner.path, "/master/banner/7");
        assert_eq!(
            banner.actions,
            PermissionActions {
                view: 1,
                create: 0,
                update: 1,
                delete: 0,
            }
        );

        let article = resolver.resolve("/master/article", EDITOR).await.unwrap();
        assert_eq!(article.id, 6);
        assert_eq!(article.actions.create, 1);
        assert_eq!(article.actions.update, 0);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_forbidden_not_found() {
        let resolver = resolver(editor_store());

        let err = resolver.resolve("/master/contact", EDITOR).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RouteForbidden);
        assert_eq!(err.http_status(), http::StatusCode::FORBIDDEN);

        let err = resolver.resolve("/master/banner", VIEWER).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RouteForbidden);
    }

    #[tokio::test]
    async fn test_first_matching_grant_wins() {
        let mut store = MemoryStore::default();
        store.credentials.push(account(EDITOR, "Editor"));
        store.grants.insert(
            "Editor".to_string(),
            vec![
                grant(8, PrivilegeAction::View, "/order/*"),
                grant(9, PrivilegeAction::Delete, "/order/:id"),
            ],
        );
        let resolver = resolver(Arc::new(store));

        let resolved = resolver.resolve("/order/3", EDITOR).await.unwrap();
        assert_eq!(resolved.id, 8);
        assert_eq!(resolved.actions.delete, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_then_expiry() {
        let store = editor_store();
        let resolver = resolver(store.clone());

        let first = resolver.resolve("/master/banner", EDITOR).await.unwrap();
        let second = resolver.resolve("/master/banner", EDITOR).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.grant_queries(), 1);

        // other paths and roles have their own keys
        resolver.resolve("/master/article", EDITOR).await.unwrap();
        assert_eq!(store.grant_queries(), 2);

        tokio::time::advance(Duration::from_secs(61)).await;
        let third = resolver.resolve("/master/banner", EDITOR).await.unwrap();
        assert_eq!(third, first);
        assert_eq!(store.grant_queries(), 3);
    }

    #[tokio::test]
    async fn test_forbidden_is_not_cached() {
        let store = editor_store();
        let resolver = resolver(store.clone());

        assert!(resolver.resolve("/nowhere", EDITOR).await.is_err());
        assert!(resolver.resolve("/nowhere", EDITOR).await.is_err());
        assert_eq!(store.grant_queries(), 2);
    }

    #[tokio::test]
    async fn test_unknown_account_is_forbidden() {
        let store = editor_store();
        let resolver = resolver(store.clone());

        let err = resolver.resolve("/master/banner", 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RouteForbidden);
        assert_eq!(store.grant_queries(), 0);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_reload() {
        let store = editor_store();
        let resolver = resolver(store.clone());

        resolver.resolve("/master/banner", EDITOR).await.unwrap();
        resolver.clear_cache().await;
        resolver.resolve("/master/banner", EDITOR).await.unwrap();
        assert_eq!(store.grant_queries(), 2);
    }
}
