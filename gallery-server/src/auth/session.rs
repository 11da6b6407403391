//! 会话签发与校验
//!
//! 每个账号只保存一个会话指纹 `"{签发秒}:{5位随机码}"`，每次登录覆盖。
//! 令牌的 `iat` 与指纹的时间部分相同；令牌有效当且仅当
//! `指纹时间 <= iat`，因此新登录会使旧令牌失效。

use std::sync::Arc;

use rand::Rng;

use crate::auth::{AuthStore, Clock, CurrentUser, JwtError, JwtService, TokenSubject};
use crate::db::repository::account::AccountCredential;
use crate::security_log;
use crate::utils::{AppError, AppResult};

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 5;

/// 生成会话指纹
pub fn new_fingerprint(issued_at: i64) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{issued_at}:{suffix}")
}

/// 解析指纹的时间部分，格式不对返回 `None`
pub fn fingerprint_epoch(fingerprint: &str) -> Option<i64> {
    let (epoch, _) = fingerprint.split_once(':')?;
    epoch.parse().ok()
}

/// 令牌是否仍是该账号的当前会话
pub fn is_session_current(fingerprint: &str, issued_at: i64) -> bool {
    fingerprint_epoch(fingerprint).is_some_and(|epoch| epoch <= issued_at)
}

/// 会话管理 - 签发令牌并校验会话
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<dyn AuthStore>,
    jwt: Arc<JwtService>,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn AuthStore>, jwt: Arc<JwtService>, clock: Arc<dyn Clock>) -> Self {
        Self { store, jwt, clock }
    }

    /// 为已验证的账号签发令牌并覆盖会话指纹
    ///
    /// 指纹写入成功后才返回令牌。
    pub async fn issue(&self, account: &AccountCredential) -> AppResult<String> {
        let now = self.clock.now_secs();
        let session_id = new_fingerprint(now);

        let subject = TokenSubject {
            account_id: account.id,
            name: &account.fullname,
            access_name: &account.access_name,
        };
        let access_token = self
            .jwt
            .generate_token(&subject, now)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

        self.store
            .upsert_session(account.id, &session_id, now)
            .await?;

        tracing::debug!(account_id = account.id, session_id = %session_id, "Session issued");

        Ok(access_token)
    }

    /// 校验令牌并确认它属于账号的当前会话
    ///
    /// | 情况 | 错误 |
    /// |------|------|
    /// | 令牌过期 | TokenExpired |
    /// | 签名、签发者、受众不符 | TokenInvalid |
    /// | 无指纹、指纹损坏、已被新登录取代 | SessionExpired |
    pub async fn authenticate(&self, token: &str) -> AppResult<CurrentUser> {
        let claims = self.jwt.validate_token(token).map_err(|e| {
            security_log!("WARN", "auth_failed", error = format!("{}", e));
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;

        let user = CurrentUser::try_from(claims)
            .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

        let fingerprint = self.store.find_session(user.id).await?;
        match fingerprint {
            Some(fp) if is_session_current(&fp, user.issued_at) => Ok(user),
            Some(fp) => {
                security_log!(
                    "WARN",
                    "session_superseded",
                    account_id = user.id,
                    issued_at = user.issued_at,
                    fingerprint = fp
                );
                Err(AppError::session_expired())
            }
            None => {
                security_log!("WARN", "session_missing", account_id = user.id);
                Err(AppError::session_expired())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_format() {
        let fp = new_fingerprint(1_700_000_000);
        let (epoch, suffix) = fp.split_once(':').unwrap();
        assert_eq!(epoch, "1700000000");
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_fingerprint_epoch() {
        assert_eq!(fingerprint_epoch("1700000000:AB12C"), Some(1_700_000_000));
        assert_eq!(fingerprint_epoch("garbage"), None);
        assert_eq!(fingerprint_epoch("abc:AB12C"), None);
        assert_eq!(fingerprint_epoch(""), None);
    }

    #[test]
    fn test_session_current_iff_epoch_not_after_iat() {
        let fp = "1000:AAAAA";
        assert!(is_session_current(fp, 1000));
        assert!(is_session_current(fp, 1001));
        assert!(!is_session_current(fp, 999));
        assert!(!is_session_current("broken", 1000));
    }
}
