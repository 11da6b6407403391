//! 路由权限缓存
//!
//! 缓存键 `permission_access:{path}:{role_name}`。同一键的并发未命中可能
//! 各自计算并写入相同结果。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use shared::models::RoutePermission;

/// 构造缓存键
pub fn cache_key(path: &str, access_name: &str) -> String {
    format!("permission_access:{path}:{access_name}")
}

/// 权限描述缓存
#[async_trait]
pub trait PermissionCache: Send + Sync + std::fmt::Debug {
    /// 未过期的缓存值
    async fn get(&self, key: &str) -> Option<RoutePermission>;

    async fn set(&self, key: String, value: RoutePermission, ttl: Duration);

    /// 清空所有条目 (角色授权变更后调用)
    async fn clear(&self);
}

/// 缓存条目
#[derive(Debug)]
struct CacheEntry {
    value: RoutePermission,
    expires_at: Instant,
}

/// 进程内缓存
#[derive(Debug, Clone, Default)]
pub struct MemoryPermissionCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryPermissionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前条目数 (含已过期未清理的)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PermissionCache for MemoryPermissionCache {
    async fn get(&self, key: &str) -> Option<RoutePermission> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    async fn set(&self, key: String, value: RoutePermission, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
