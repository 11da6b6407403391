//! Gallery Server - 画廊电商后台的访问控制服务
//!
//! # 架构概述
//!
//! - **认证** (`auth`): 用户名密码校验、JWT + 会话指纹
//! - **菜单树** (`menu`): 扁平菜单权限行 → 带动作的导航树
//! - **路由权限** (`permission`): 具体路径 + 角色 → 动作描述，带 TTL 缓存
//! - **数据库** (`db`): SQLite (sqlx) 连接池、迁移、初始数据
//! - **HTTP API** (`api`): 登录接口和后台管理接口
//!
//! # 模块结构
//!
//! ```text
//! gallery-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 凭证、会话、中间件
//! ├── menu/          # 菜单树构建
//! ├── permission/    # 路由模式、缓存、解析器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 连接池、仓储、初始数据
//! └── utils/         # 错误映射、日志、输入规范化
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod menu;
pub mod permission;
pub mod utils;

pub use crate::core::{Config, Server, ServerError, ServerState};
pub use auth::{CurrentUser, JwtService};
pub use utils::logger::init_logger_with_file;
pub use utils::{AppError, AppResult, ErrorBody, ErrorCode};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` 并初始化日志
///
/// `LOG_LEVEL`, `LOG_DIR` and `LOG_JSON` are read here rather than from
/// [`Config`] so that config loading itself is logged.
pub fn setup_environment() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    let json = std::env::var("LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref())
}
