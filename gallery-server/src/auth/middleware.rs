//! 会话中间件
//!
//! 除登录接口外，所有 `/api/` 请求都要带 `Authorization: Bearer <token>`。
//! 校验通过的 [`CurrentUser`] 放进请求扩展，处理函数经提取器拿到它。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Method, Uri, header::AUTHORIZATION};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 无需会话的接口
const PUBLIC_ROUTES: &[&str] = &["/api/v1/auth/login"];

fn is_guarded(method: &Method, path: &str) -> bool {
    method != Method::OPTIONS && path.starts_with("/api/") && !PUBLIC_ROUTES.contains(&path)
}

/// 由 Bearer 令牌得到调用者
///
/// 缺少请求头为 1001，不是 `Bearer ...` 为 1004。签名、过期和指纹校验在
/// [`SessionManager::authenticate`](crate::auth::SessionManager::authenticate)。
pub(crate) async fn authenticate_headers(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<CurrentUser, AppError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        security_log!("WARN", "auth_missing", path = uri.path());
        return Err(AppError::unauthorized());
    };

    let token = header
        .to_str()
        .ok()
        .and_then(JwtService::extract_from_header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    state.auth.sessions().authenticate(token).await
}

/// 会话中间件
///
/// 放行 CORS 预检、非 API 路径 (`/health`、404) 和登录接口。
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_guarded(req.method(), req.uri().path()) {
        let user = authenticate_headers(&state, req.headers(), req.uri()).await?;
        req.extensions_mut().insert(user);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_paths() {
        assert!(is_guarded(&Method::GET, "/api/v1/auth/me"));
        assert!(is_guarded(&Method::POST, "/api/v1/access/create"));
        assert!(!is_guarded(&Method::POST, "/api/v1/auth/login"));
        assert!(!is_guarded(&Method::OPTIONS, "/api/v1/auth/me"));
        assert!(!is_guarded(&Method::GET, "/health"));
    }
}
