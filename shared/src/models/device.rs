//! Device Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client platform reported at login
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum DevicePlatform {
    #[default]
    Web,
    Mobile,
}

/// Client metadata sent with a login request
///
/// Stored as the account's last-seen device; each login overwrites it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DeviceInfo {
    #[validate(length(max = 255))]
    pub firebase_id: Option<String>,
    #[validate(length(max = 50))]
    pub device_browser: Option<String>,
    #[validate(length(max = 50))]
    pub device_browser_version: Option<String>,
    #[validate(length(max = 50))]
    pub device_imei: Option<String>,
    #[validate(length(max = 50))]
    pub device_model: Option<String>,
    #[validate(length(max = 50))]
    pub device_type: Option<String>,
    #[validate(length(max = 50))]
    pub device_vendor: Option<String>,
    #[validate(length(max = 50))]
    pub device_os: Option<String>,
    #[validate(length(max = 50))]
    pub device_os_version: Option<String>,
    #[serde(default)]
    pub device_platform: DevicePlatform,
    #[validate(length(max = 255))]
    pub user_agent: Option<String>,
    #[validate(length(max = 20))]
    pub app_version: Option<String>,
}
