use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{AuthService, AuthStore, Clock, DbStore, JwtService, SessionManager, SystemClock};
use crate::core::Config;
use crate::db::{DbService, seed};
use crate::permission::{MemoryPermissionCache, PermissionCache, RouteResolver};
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是 `Arc` 或内部含 `Arc`，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 数据库连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | clock | Arc<dyn Clock> | 时间源 |
/// | auth | AuthService | 登录、会话、菜单 |
/// | resolver | RouteResolver | 路由权限解析 (带缓存) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接池
    pub pool: SqlitePool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 时间源
    pub clock: Arc<dyn Clock>,
    /// 认证服务
    pub auth: AuthService,
    /// 路由权限解析器
    pub resolver: RouteResolver,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 测试通过这里注入时钟和缓存；通常使用 [`ServerState::initialize`]。
    pub fn new(
        config: Config,
        pool: SqlitePool,
        clock: Arc<dyn Clock>,
        cache: Arc<dyn PermissionCache>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let store: Arc<dyn AuthStore> = Arc::new(DbStore::new(pool.clone()));

        let sessions = SessionManager::new(store.clone(), jwt_service.clone(), clock.clone());
        let auth = AuthService::new(store.clone(), sessions, clock.clone());
        let resolver = RouteResolver::new(store, cache, config.permission_cache_ttl());

        Self {
            config,
            pool,
            jwt_service,
            clock,
            auth,
            resolver,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (连接池 + 迁移)
    /// 2. 初始数据 (`config.seed` 为真且库为空时)
    /// 3. 各服务 (JWT, 会话, 权限解析)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_url).await?;

        if config.seed {
            seed::seed_if_empty(&db.pool).await?;
        }

        Ok(Self::new(
            config.clone(),
            db.pool,
            Arc::new(SystemClock),
            Arc::new(MemoryPermissionCache::new()),
        ))
    }

    pub fn now_secs(&self) -> i64 {
        self.clock.now_secs()
    }
}
