//! Privilege and Route Permission Models

use serde::{Deserialize, Serialize};

/// Action a privilege grants on its menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PrivilegeAction {
    View,
    Create,
    Update,
    Delete,
}

impl PrivilegeAction {
    /// All actions in descriptor order
    pub const ALL: [PrivilegeAction; 4] = [
        PrivilegeAction::View,
        PrivilegeAction::Create,
        PrivilegeAction::Update,
        PrivilegeAction::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegeAction::View => "view",
            PrivilegeAction::Create => "create",
            PrivilegeAction::Update => "update",
            PrivilegeAction::Delete => "delete",
        }
    }
}

/// One `(menu, action, route pattern)` tuple granted to a role
///
/// Input of the route permission resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RouteGrant {
    pub menu_id: i64,
    pub action: PrivilegeAction,
    /// Route pattern, e.g. `/master/banner/:id`
    pub path: String,
}

/// Per-action flags, each 0 or 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionActions {
    pub view: u8,
    pub create: u8,
    pub update: u8,
    pub delete: u8,
}

impl PermissionActions {
    /// Raise the flag for `action`
    pub fn grant(&mut self, action: PrivilegeAction) {
        match action {
            PrivilegeAction::View => self.view = 1,
            PrivilegeAction::Create => self.create = 1,
            PrivilegeAction::Update => self.update = 1,
            PrivilegeAction::Delete => self.delete = 1,
        }
    }
}

/// Resolved permission descriptor for a concrete route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePermission {
    /// Menu the matched route belongs to
    pub id: i64,
    /// The concrete path that was asked for
    pub path: String,
    pub actions: PermissionActions,
}
