//! 认证授权模块
//!
//! 提供登录、会话和中间件：
//! - [`verify_credentials`] - 用户名密码校验
//! - [`SessionManager`] - 令牌签发与会话校验
//! - [`AuthService`] - 登录、当前用户、菜单
//! - [`JwtService`] - JWT 令牌服务
//! - [`require_auth`] - 认证中间件

pub mod clock;
pub mod credential;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod service;
pub mod session;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credential::{hash_password, verify_credentials, verify_password};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenSubject};
pub use middleware::require_auth;
pub use service::AuthService;
pub use session::SessionManager;
pub use store::{AuthStore, DbStore};
