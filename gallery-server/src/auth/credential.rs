//! 凭证校验
//!
//! Argon2 计算放在阻塞线程池。用户名不存在时也会对固定的占位哈希做一次
//! 校验，耗时与密码错误相同。

use std::sync::OnceLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::auth::AuthStore;
use crate::db::repository::account::AccountCredential;
use crate::security_log;
use crate::utils::{AppError, AppResult};

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn hash_blocking(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash_blocking("gallery-dummy-password").ok())
        .as_deref()
}

/// 明文密码 → PHC 格式哈希
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// 校验明文密码与已存哈希
///
/// 已存哈希格式损坏按不匹配处理。
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

/// 按用户名和密码取启用账号
///
/// 用户名不存在和密码错误都返回 [`AppError::invalid_credentials`]。
pub async fn verify_credentials(
    store: &dyn AuthStore,
    username: &str,
    password: &str,
) -> AppResult<AccountCredential> {
    let credential = store.find_credential(username).await?;

    let Some(credential) = credential else {
        if let Some(hash) = tokio::task::spawn_blocking(dummy_hash)
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        {
            verify_password(password.to_string(), hash.to_string()).await?;
        }
        security_log!("WARN", "login_failed", username = username, reason = "unknown_user");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(password.to_string(), credential.password.clone()).await? {
        security_log!("WARN", "login_failed", username = username, reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }

    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("12345678".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("12345678".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("87654321".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("x".to_string(), "not-a-phc".to_string()).await.unwrap());
    }
}
