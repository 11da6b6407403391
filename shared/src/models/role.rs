//! Role Model
//!
//! A role is called an "access" by the admin frontend; accounts carry exactly one.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::permission::PrivilegeAction;

/// Role entity (RBAC 角色)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Listed in role pickers
    pub is_show: bool,
    pub status: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Privilege granted to a role, with the menu it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoleGrant {
    pub privilege_id: i64,
    pub menu_id: i64,
    pub menu_name: String,
    pub action: PrivilegeAction,
}

/// Role with its grants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDetail {
    #[serde(flatten)]
    pub role: Role,
    pub grants: Vec<RoleGrant>,
}

/// Role picker entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoleOption {
    pub id: i64,
    pub name: String,
}

/// Privilege reference inside create/update payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivilegeRef {
    pub privilege_id: i64,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleCreate {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "at least one privilege is required"))]
    pub actions: Vec<PrivilegeRef>,
}

/// Update role payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleUpdate {
    pub id: i64,
    #[validate(range(min = 0, max = 1))]
    pub status: i64,
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "at least one privilege is required"))]
    pub actions: Vec<PrivilegeRef>,
}
