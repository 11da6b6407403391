//! Device Record Repository

use super::RepoResult;
use shared::models::DeviceInfo;
use sqlx::SqlitePool;

/// Insert or overwrite the account's last-seen device
pub async fn upsert(
    pool: &SqlitePool,
    account_id: i64,
    device: &DeviceInfo,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO account_device (account_id, firebase_id, device_browser, device_browser_version, device_imei, device_model, device_type, device_vendor, device_os, device_os_version, device_platform, user_agent, app_version, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14) \
         ON CONFLICT(account_id) DO UPDATE SET \
            firebase_id = excluded.firebase_id, \
            device_browser = excluded.device_browser, \
            device_browser_version = excluded.device_browser_version, \
            device_imei = excluded.device_imei, \
            device_model = excluded.device_model, \
            device_type = excluded.device_type, \
            device_vendor = excluded.device_vendor, \
            device_os = excluded.device_os, \
            device_os_version = excluded.device_os_version, \
            device_platform = excluded.device_platform, \
            user_agent = excluded.user_agent, \
            app_version = excluded.app_version, \
            updated_at = excluded.updated_at",
    )
    .bind(account_id)
    .bind(&device.firebase_id)
    .bind(&device.device_browser)
    .bind(&device.device_browser_version)
    .bind(&device.device_imei)
    .bind(&device.device_model)
    .bind(&device.device_type)
    .bind(&device.device_vendor)
    .bind(&device.device_os)
    .bind(&device.device_os_version)
    .bind(device.device_platform)
    .bind(&device.user_agent)
    .bind(&device.app_version)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}
