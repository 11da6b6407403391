use std::time::Duration;

use crate::auth::JwtConfig;
use crate::auth::jwt::MIN_SECRET_LEN;
use crate::core::ServerError;

/// 服务器配置 - 画廊后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite:gallery.db | SQLite 数据库 |
/// | JWT_SECRET | (开发环境随机生成) | 令牌签名密钥 |
/// | JWT_EXPIRES_IN_MINUTES | 1440 | 令牌有效期 |
/// | JWT_ISSUER | gallery-server | 令牌签发者 |
/// | JWT_AUDIENCE | gallery-admin | 令牌受众 |
/// | PERMISSION_CACHE_TTL_SECS | 60 | 路由权限缓存 TTL |
/// | API_SEED | 开发环境 true | 空库时写入初始数据 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// 日志相关的 LOG_LEVEL / LOG_DIR / LOG_JSON 在
/// [`setup_environment`](crate::setup_environment) 中读取，早于本配置。
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_URL=sqlite:/data/gallery.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 连接串
    pub database_url: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 路由权限缓存 TTL (秒)
    pub permission_cache_ttl_secs: u64,
    /// 空库时是否写入初始数据
    pub seed: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_development = environment == "development";

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:gallery.db".into()),
            jwt: JwtConfig::from_env(is_development),
            permission_cache_ttl_secs: std::env::var("PERMISSION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            seed: std::env::var("API_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_development),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            environment,
        }
    }

    /// 测试用配置：内存库、固定密钥、不写入初始数据
    pub fn for_tests() -> Self {
        Self {
            environment: "test".into(),
            http_port: 0,
            database_url: "sqlite::memory:".into(),
            jwt: JwtConfig {
                secret: "gallery-test-secret-with-at-least-32-chars".into(),
                expiration_minutes: 60,
                issuer: "gallery-server".into(),
                audience: "gallery-admin".into(),
            },
            permission_cache_ttl_secs: 60,
            seed: false,
            request_timeout_ms: 30000,
        }
    }

    /// 启动前检查配置
    ///
    /// 密钥过短、令牌有效期非正数时拒绝启动。
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.jwt.secret.len() < MIN_SECRET_LEN {
            return Err(ServerError::Config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} characters"
            )));
        }
        if self.jwt.expiration_minutes <= 0 {
            return Err(ServerError::Config(
                "JWT_EXPIRES_IN_MINUTES must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn permission_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.permission_cache_ttl_secs)
    }
}
